//! # Daily Records → Packed Year
//!
//! Turns a sparse list of `"MM-DD"` sunrise/sunset records into a
//! [`PackedYear`]. The encoder walks the 365 days of the reference year,
//! looks each one up by its `"MM-DD"` key and packs whatever it finds.
//!
//! ## Tolerance
//! The upstream scraper is not trusted to produce clean data:
//! - a missing day encodes as `(0, 0)`, never daylight
//! - a clock string that is not `HH:MM` (H 0–23, M 0–59) encodes as interval 0
//! - indices are clamped to 96 so the two 7-bit fields can never bleed into
//!   each other
//! - `02-29` has no slot in the reference year and is dropped
//!
//! None of these are errors; they are logged at `debug` level.

use crate::{
    DailyEntry, DaylightWindow, PackedYear, BITS_PER_DAY, DAYS_IN_YEAR, INTERVALS_PER_DAY,
    INTERVAL_MINUTES, PACKED_LEN, PAYLOAD_BITS, REFERENCE_YEAR,
};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::collections::HashMap;
use tracing::{debug, info};

/// Encode daily records into a packed year.
///
/// When several records share a date the last one wins.
///
/// # Example
/// ```
/// use daylight_mask::{encoder::encode, DailyEntry, DaylightWindow};
///
/// let year = encode(&[DailyEntry::new("01-02", "07:50", "16:10")]);
/// assert_eq!(year.window(1), Some(DaylightWindow::new(31, 64)));
/// assert_eq!(year.window(0), Some(DaylightWindow::default()));
/// ```
pub fn encode(entries: &[DailyEntry]) -> PackedYear {
    let by_date: HashMap<&str, &DailyEntry> = entries
        .iter()
        .map(|entry| (entry.date.as_str(), entry))
        .collect();

    let windows: Vec<DaylightWindow> = reference_dates()
        .map(|date| {
            let key = date.format("%m-%d").to_string();
            by_date
                .get(key.as_str())
                .map(|entry| entry_window(entry))
                .unwrap_or_default()
        })
        .collect();

    let populated = windows.iter().filter(|w| **w != DaylightWindow::default()).count();
    let year = PackedYear::from_windows(&windows);
    info!(
        "Packed {} days ({} with data) into {} bits / {} bytes",
        DAYS_IN_YEAR, populated, PAYLOAD_BITS, PACKED_LEN
    );
    debug!("{} bits per day", BITS_PER_DAY);
    year
}

/// Window for one record, applying clock-string fallbacks and clamping.
pub fn entry_window(entry: &DailyEntry) -> DaylightWindow {
    DaylightWindow::new(
        clock_index(&entry.sunrise, &entry.date),
        clock_index(&entry.sunset, &entry.date),
    )
}

/// Parse `"HH:MM"` into minutes since midnight, or `None` if malformed.
///
/// # Example
/// ```
/// use daylight_mask::encoder::parse_clock;
///
/// assert_eq!(parse_clock("16:00"), Some(960));
/// assert_eq!(parse_clock("24:00"), None);
/// assert_eq!(parse_clock("dusk"), None);
/// ```
pub fn parse_clock(clock: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(clock.trim(), "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// The 15-minute interval index containing `minutes` since midnight,
/// clamped to [`INTERVALS_PER_DAY`].
pub fn minutes_to_index(minutes: u32) -> u8 {
    (minutes / INTERVAL_MINUTES).min(u32::from(INTERVALS_PER_DAY)) as u8
}

fn clock_index(clock: &str, date: &str) -> u8 {
    match parse_clock(clock) {
        Some(minutes) => minutes_to_index(minutes),
        None => {
            debug!("Malformed clock string {:?} for {}, using interval 0", clock, date);
            0
        }
    }
}

/// The 365 calendar dates of the reference year, Jan 1 first.
pub fn reference_dates() -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).unwrap_or_default();
    (0..i64::from(DAYS_IN_YEAR)).map(move |day| start + Duration::days(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_accepts_valid_times() {
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(parse_clock("07:05"), Some(425));
        assert_eq!(parse_clock("23:59"), Some(1439));
        assert_eq!(parse_clock(" 12:30 "), Some(750));
    }

    #[test]
    fn test_parse_clock_rejects_malformed() {
        for bad in ["", "12", "12:", ":30", "25:00", "12:60", "ab:cd", "12:30:00", "-1:00"] {
            assert_eq!(parse_clock(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_minutes_to_index() {
        assert_eq!(minutes_to_index(0), 0);
        assert_eq!(minutes_to_index(14), 0);
        assert_eq!(minutes_to_index(15), 1);
        assert_eq!(minutes_to_index(960), 64);
        assert_eq!(minutes_to_index(1439), 95);
        assert_eq!(minutes_to_index(1440), 96);
        assert_eq!(minutes_to_index(100_000), 96);
    }

    #[test]
    fn test_reference_dates_cover_non_leap_year() {
        let dates: Vec<String> = reference_dates()
            .map(|d| d.format("%m-%d").to_string())
            .collect();
        assert_eq!(dates.len(), 365);
        assert_eq!(dates[0], "01-01");
        assert_eq!(dates[58], "02-28");
        assert_eq!(dates[59], "03-01");
        assert_eq!(dates[364], "12-31");
        assert!(!dates.iter().any(|d| d == "02-29"));
    }

    #[test]
    fn test_encode_concrete_entry() {
        let year = encode(&[DailyEntry::new("01-01", "16:00", "22:00")]);
        assert_eq!(year.window(0), Some(DaylightWindow::new(64, 88)));
        assert_eq!(year.segment(0), Some((88 << 7) | 64));
    }

    #[test]
    fn test_malformed_field_falls_back_per_field() {
        let year = encode(&[
            DailyEntry::new("03-01", "06:15", "sunset?"),
            DailyEntry::new("03-02", "??", "18:00"),
        ]);
        assert_eq!(year.window(59), Some(DaylightWindow::new(25, 0)));
        assert_eq!(year.window(60), Some(DaylightWindow::new(0, 72)));
    }

    #[test]
    fn test_missing_and_leap_day_entries() {
        let year = encode(&[DailyEntry::new("02-29", "06:00", "18:00")]);
        assert!((0..365).all(|d| year.window(d) == Some(DaylightWindow::default())));
        assert!(year.is_initialized());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let year = encode(&[
            DailyEntry::new("12-31", "01:00", "02:00"),
            DailyEntry::new("12-31", "03:00", "04:00"),
        ]);
        assert_eq!(year.window(364), Some(DaylightWindow::new(12, 16)));
    }
}
