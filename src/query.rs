//! # Timestamp → Day/Interval Addressing
//!
//! Maps UTC epoch seconds onto the fixed 365-day reference cycle. All
//! divisions are floor divisions and all remainders are non-negative, so
//! instants before the reference epoch wrap backwards into December.

use crate::{
    BITS_PER_DAY, DAYS_IN_YEAR, INTERVAL_MINUTES, LEAD_PAD_BITS, REFERENCE_EPOCH,
    SECONDS_PER_DAY, SECONDS_PER_MINUTE,
};
use chrono::Utc;

/// Day index (0 = Jan 1 … 364 = Dec 31) of `timestamp` within the cycle.
///
/// # Example
/// ```
/// use daylight_mask::query::day_index;
/// use daylight_mask::REFERENCE_EPOCH;
///
/// assert_eq!(day_index(REFERENCE_EPOCH), 0);
/// assert_eq!(day_index(REFERENCE_EPOCH - 1), 364);
/// assert_eq!(day_index(REFERENCE_EPOCH + 365 * 86_400), 0);
/// ```
pub fn day_index(timestamp: i64) -> u16 {
    let delta = i128::from(timestamp) - i128::from(REFERENCE_EPOCH);
    delta
        .div_euclid(i128::from(SECONDS_PER_DAY))
        .rem_euclid(i128::from(DAYS_IN_YEAR)) as u16
}

/// 15-minute interval index (0–95) of `timestamp` within its UTC day.
pub fn interval_index(timestamp: i64) -> u8 {
    let delta = i128::from(timestamp) - i128::from(REFERENCE_EPOCH);
    let seconds_into_day = delta.rem_euclid(i128::from(SECONDS_PER_DAY));
    let minutes = seconds_into_day / i128::from(SECONDS_PER_MINUTE);
    (minutes / i128::from(INTERVAL_MINUTES)) as u8
}

/// Bit offset of `day`'s segment from the first bit of an exported year.
///
/// Day 0 follows the 10 padding bits; day 364 ends on the final bit.
pub fn day_bit_offset(day: u16) -> usize {
    LEAD_PAD_BITS + usize::from(day) * BITS_PER_DAY as usize
}

/// Distance in bits from the least-significant end of the year to the low bit
/// of `day`'s segment: `(364 - day) * 14`. Saturates for out-of-cycle days.
pub fn day_shift_from_lsb(day: u16) -> usize {
    usize::from((DAYS_IN_YEAR - 1).saturating_sub(day)) * BITS_PER_DAY as usize
}

/// Current instant as epoch seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PACKED_LEN;
    use chrono::TimeZone;

    fn at(month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, month, day, hour, minute, 0)
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_reference_epoch_matches_calendar() {
        assert_eq!(at(1, 1, 0, 0), REFERENCE_EPOCH);
    }

    #[test]
    fn test_day_index_calendar_days() {
        assert_eq!(day_index(at(1, 1, 23, 59)), 0);
        assert_eq!(day_index(at(1, 2, 0, 0)), 1);
        assert_eq!(day_index(at(7, 1, 12, 0)), 181);
        assert_eq!(day_index(at(12, 31, 23, 59)), 364);
    }

    #[test]
    fn test_day_index_wraps_both_ways() {
        let year = 365 * SECONDS_PER_DAY;
        assert_eq!(day_index(REFERENCE_EPOCH + year), 0);
        assert_eq!(day_index(REFERENCE_EPOCH + year - 1), 364);
        assert_eq!(day_index(REFERENCE_EPOCH - SECONDS_PER_DAY), 364);
        assert_eq!(day_index(0), day_index(year));
    }

    #[test]
    fn test_interval_index() {
        assert_eq!(interval_index(at(1, 1, 0, 0)), 0);
        assert_eq!(interval_index(at(1, 1, 0, 14)), 0);
        assert_eq!(interval_index(at(1, 1, 0, 15)), 1);
        assert_eq!(interval_index(at(1, 1, 16, 30)), 66);
        assert_eq!(interval_index(at(1, 1, 23, 59)), 95);
        // One second before the epoch is the last interval of Dec 31
        assert_eq!(interval_index(REFERENCE_EPOCH - 1), 95);
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        assert!(day_index(i64::MIN) < DAYS_IN_YEAR);
        assert!(day_index(i64::MAX) < DAYS_IN_YEAR);
        assert!(interval_index(i64::MIN) < 96);
        assert!(interval_index(i64::MAX) < 96);
    }

    #[test]
    fn test_offsets_cover_buffer_exactly() {
        assert_eq!(day_bit_offset(0), 10);
        assert_eq!(day_bit_offset(364) + 14, PACKED_LEN * 8);
        assert_eq!(day_shift_from_lsb(364), 0);
        assert_eq!(day_shift_from_lsb(0), 364 * 14);
        // Both addressings agree on where a day sits
        for day in [0u16, 1, 2, 100, 363, 364] {
            assert_eq!(
                day_bit_offset(day) + 14 + day_shift_from_lsb(day),
                PACKED_LEN * 8
            );
        }
    }
}
