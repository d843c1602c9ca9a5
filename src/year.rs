//! # Packed Year
//!
//! The 640-byte persistent form of a daylight schedule and the O(1) query
//! engine that runs against it.
//!
//! ## Layout
//!
//! ```text
//! bit 0        10            24            38                    5106         5120
//! | 10 x zero  | day 0 (Jan 1) | day 1       | ...                | day 364    |
//!              | sunset|sunrise|
//!              |  7 b  |  7 b  |
//! ```
//!
//! Read as one 5120-bit big-endian integer, day 364 occupies the lowest 14 bits
//! and day 0 the highest populated 14 bits.
//!
//! ## Initialisation
//! An all-zero year ("never daylight" every day) and a year that was never
//! populated have identical bytes. [`PackedYear`] tracks the difference with an
//! explicit flag: [`PackedYear::default`] is uninitialised and refuses to be
//! queried or exported; everything produced by encoding, import or a partial
//! load is initialised.

use crate::{
    bits,
    query::{day_bit_offset, day_index, interval_index},
    DaylightError, DaylightWindow, BITS_PER_DAY, DAYS_IN_YEAR, PACKED_LEN,
};

/// A full year of daylight windows in its exported byte layout.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PackedYear {
    bytes: [u8; PACKED_LEN],
    initialized: bool,
}

impl Default for PackedYear {
    /// An uninitialised year. Every query and export fails until it is
    /// replaced by an encoded or imported one.
    fn default() -> Self {
        PackedYear {
            bytes: [0; PACKED_LEN],
            initialized: false,
        }
    }
}

impl std::fmt::Debug for PackedYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let populated = (0..DAYS_IN_YEAR)
            .filter(|&day| self.segment(day).is_some_and(|s| s != 0))
            .count();
        f.debug_struct("PackedYear")
            .field("initialized", &self.initialized)
            .field("populated_days", &populated)
            .finish()
    }
}

impl PackedYear {
    /// Build a year from per-day windows. `windows[i]` is day `i`; days past
    /// the end of the slice are `(0, 0)` and entries past day 364 are ignored.
    pub fn from_windows(windows: &[DaylightWindow]) -> Self {
        let mut year = PackedYear {
            bytes: [0; PACKED_LEN],
            initialized: true,
        };
        for (day, window) in (0..DAYS_IN_YEAR).zip(windows.iter()) {
            year.put_segment(day, window.to_segment());
        }
        year
    }

    /// Build a year holding a single day's segment with every other day zeroed.
    pub(crate) fn with_single_segment(day: u16, segment: u16) -> Self {
        let mut year = PackedYear {
            bytes: [0; PACKED_LEN],
            initialized: true,
        };
        year.put_segment(day, segment);
        year
    }

    /// Parse an exported year. The input must be exactly [`PACKED_LEN`] bytes.
    ///
    /// The 10 padding bits are not validated; they are never read.
    pub fn import(bytes: &[u8]) -> Result<Self, DaylightError> {
        let bytes: [u8; PACKED_LEN] =
            bytes
                .try_into()
                .map_err(|_| DaylightError::InvalidLength {
                    expected: PACKED_LEN,
                    actual: bytes.len(),
                })?;
        Ok(PackedYear {
            bytes,
            initialized: true,
        })
    }

    /// The full-width big-endian byte form, leading zero bytes included.
    pub fn export(&self) -> Result<[u8; PACKED_LEN], DaylightError> {
        self.ensure_initialized()?;
        Ok(self.bytes)
    }

    /// Raw bytes without the initialisation check.
    pub fn as_bytes(&self) -> &[u8; PACKED_LEN] {
        &self.bytes
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Decoded window for `day` (0–364), or `None` outside the cycle.
    pub fn window(&self, day: u16) -> Option<DaylightWindow> {
        self.segment(day).map(DaylightWindow::from_segment)
    }

    /// Raw 14-bit segment for `day`.
    pub fn segment(&self, day: u16) -> Option<u16> {
        if day >= DAYS_IN_YEAR {
            return None;
        }
        bits::extract_bits(&self.bytes, day_bit_offset(day), BITS_PER_DAY).map(|v| v as u16)
    }

    /// Whether `timestamp` (UTC epoch seconds) falls inside its day's
    /// daylight window.
    ///
    /// The day is `floor((timestamp - epoch) / 86400) mod 365` and the
    /// interval is the 15-minute slot within that UTC day. The test is
    /// half-open: the sunrise interval is daylight, the sunset interval is not.
    ///
    /// # Errors
    /// [`DaylightError::Uninitialized`] if this year was never populated.
    pub fn is_daylight(&self, timestamp: i64) -> Result<bool, DaylightError> {
        self.ensure_initialized()?;

        let Some(window) = self.window(day_index(timestamp)) else {
            // Outside the buffer's domain: answer rather than fail
            return Ok(false);
        };
        Ok(window.contains(interval_index(timestamp)))
    }

    fn put_segment(&mut self, day: u16, segment: u16) {
        if day < DAYS_IN_YEAR {
            let written = bits::insert_bits(
                &mut self.bytes,
                day_bit_offset(day),
                BITS_PER_DAY,
                u64::from(segment),
            );
            debug_assert!(written, "day {day} segment lies outside the buffer");
        }
    }

    fn ensure_initialized(&self) -> Result<(), DaylightError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DaylightError::Uninitialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{query::day_shift_from_lsb, REFERENCE_EPOCH, SECONDS_PER_DAY};

    /// Interpret the whole buffer as a 5120-bit big-endian integer and pull out
    /// one day the way the shift-and-mask formulation describes it.
    fn segment_via_lsb_shift(bytes: &[u8; PACKED_LEN], day: u16) -> u16 {
        let shift = day_shift_from_lsb(day);
        let mut value = 0u16;
        for i in 0..BITS_PER_DAY as usize {
            let bit_from_lsb = shift + i;
            let byte = bytes[PACKED_LEN - 1 - bit_from_lsb / 8];
            if (byte >> (bit_from_lsb % 8)) & 1 == 1 {
                value |= 1 << i;
            }
        }
        value
    }

    fn ts(day: i64, interval: i64) -> i64 {
        REFERENCE_EPOCH + day * SECONDS_PER_DAY + interval * 15 * 60
    }

    #[test]
    fn test_default_is_uninitialized() {
        let year = PackedYear::default();
        assert!(!year.is_initialized());
        assert!(matches!(
            year.is_daylight(REFERENCE_EPOCH),
            Err(DaylightError::Uninitialized)
        ));
        assert!(matches!(year.export(), Err(DaylightError::Uninitialized)));
    }

    #[test]
    fn test_all_night_year_is_initialized() {
        let year = PackedYear::from_windows(&[]);
        assert!(year.is_initialized());
        assert_eq!(year.export().unwrap(), [0u8; PACKED_LEN]);
        assert!(!year.is_daylight(ts(10, 48)).unwrap());
    }

    #[test]
    fn test_day_364_sits_at_lsb() {
        let mut windows = vec![DaylightWindow::default(); 365];
        windows[364] = DaylightWindow::new(1, 2);
        let year = PackedYear::from_windows(&windows);
        let bytes = year.export().unwrap();
        // (2 << 7) | 1 = 0x0101
        assert_eq!(bytes[PACKED_LEN - 1], 0x01);
        assert_eq!(bytes[PACKED_LEN - 2], 0x01);
        assert!(bytes[..PACKED_LEN - 2].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_day_0_follows_padding() {
        let mut windows = vec![DaylightWindow::default(); 1];
        windows[0] = DaylightWindow::new(96, 96);
        let year = PackedYear::from_windows(&windows);
        let bytes = year.export().unwrap();
        // Segment 0x3060 fills the low 14 bits of bytes 1..=2
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 0x30);
        assert_eq!(bytes[2], 0x60);
        assert_eq!(year.segment(0), Some((96 << 7) | 96));
    }

    #[test]
    fn test_addressing_matches_lsb_shift_formulation() {
        let windows: Vec<DaylightWindow> = (0..365u16)
            .map(|d| DaylightWindow::new((d % 90) as u8, (d % 90 + 5) as u8))
            .collect();
        let year = PackedYear::from_windows(&windows);
        for day in 0..365u16 {
            assert_eq!(
                year.segment(day),
                Some(segment_via_lsb_shift(year.as_bytes(), day)),
                "day {day}"
            );
            assert_eq!(year.window(day), Some(windows[usize::from(day)]));
        }
        assert_eq!(year.window(365), None);
    }

    #[test]
    fn test_import_export_round_trip() {
        let windows: Vec<DaylightWindow> = (0..365u16)
            .map(|d| DaylightWindow::new(20 + (d % 10) as u8, 70 + (d % 20) as u8))
            .collect();
        let year = PackedYear::from_windows(&windows);
        let bytes = year.export().unwrap();
        assert_eq!(bytes.len(), 640);
        let back = PackedYear::import(&bytes).unwrap();
        assert_eq!(back, year);
    }

    #[test]
    fn test_import_rejects_wrong_length() {
        match PackedYear::import(&[0u8; 639]) {
            Err(DaylightError::InvalidLength { expected, actual }) => {
                assert_eq!(expected, 640);
                assert_eq!(actual, 639);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(PackedYear::import(&[0u8; 641]).is_err());
    }

    #[test]
    fn test_imported_oversized_indices_are_clamped() {
        let mut bytes = [0u8; PACKED_LEN];
        // Day 364 segment = 0x3FFF: sunrise 127, sunset 127
        bytes[PACKED_LEN - 1] = 0xFF;
        bytes[PACKED_LEN - 2] = 0x3F;
        let year = PackedYear::import(&bytes).unwrap();
        assert_eq!(year.window(364), Some(DaylightWindow::new(96, 96)));
    }

    #[test]
    fn test_boundary_intervals() {
        let mut windows = vec![DaylightWindow::default(); 365];
        windows[40] = DaylightWindow::new(64, 96);
        let year = PackedYear::from_windows(&windows);

        assert!(!year.is_daylight(ts(40, 63)).unwrap());
        assert!(year.is_daylight(ts(40, 64)).unwrap());
        assert!(year.is_daylight(ts(40, 95)).unwrap());
        // Interval 96 of day 40 is interval 0 of day 41
        assert!(!year.is_daylight(ts(40, 96)).unwrap());
        assert!(year.is_daylight(ts(40, 95) + 899).unwrap());
    }

    #[test]
    fn test_inverted_window_is_never_daylight() {
        let mut windows = vec![DaylightWindow::default(); 3];
        windows[2] = DaylightWindow::new(80, 20);
        let year = PackedYear::from_windows(&windows);
        assert!((0..96).all(|i| !year.is_daylight(ts(2, i)).unwrap()));
    }

    #[test]
    fn test_debug_reports_populated_days() {
        let year = PackedYear::from_windows(&[DaylightWindow::new(1, 2)]);
        let debug = format!("{year:?}");
        assert!(debug.contains("populated_days: 1"));
    }
}
