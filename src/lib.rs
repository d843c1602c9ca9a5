//! # Daylight Mask Core Library
//!
//! A compact encoding of a recurring 365-day daylight schedule. For every day of
//! a fixed reference year the library stores the 15-minute UTC interval at which
//! daylight begins and the interval at which it ends.
//!
//! ## Design Philosophy
//!
//! ### Fixed Footprint
//! - **14 bits per day**: two 7-bit interval indices (sunrise, sunset)
//! - **640 bytes per year**: 365 × 14 = 5110 bits, padded to 5120 bits with 10
//!   zero bits on the most-significant (Jan 1) side
//! - **No header**: any 640-byte file in this layout is a valid year
//!
//! ### Constant-Time Queries
//! "Is it daylight at instant `t`" is a day-index computation, one 14-bit
//! extraction and two integer comparisons. See [`PackedYear::is_daylight`].
//!
//! ### Partial Reads
//! A single day can be answered straight from disk by reading only the 2 or 3
//! bytes that contain its field. See [`partial::load_day`].
//!
//! ### Data Flow
//! 1. **Encode**: daily `"MM-DD"` sunrise/sunset records → [`PackedYear`]
//! 2. **Persist**: [`PackedYear::export`] → 640 bytes on disk
//! 3. **Query**: [`PackedYear::import`] + [`PackedYear::is_daylight`], or
//!    [`partial::load_day`] + [`SparseYear::is_daylight`] for one day
//!
//! ## Example
//! ```
//! use daylight_mask::{encoder, DailyEntry};
//!
//! let entries = vec![DailyEntry::new("01-01", "16:00", "22:00")];
//! let year = encoder::encode(&entries);
//!
//! // 2025-01-01T16:30:00Z
//! assert!(year.is_daylight(1_735_749_000).unwrap());
//! // 2025-01-01T22:00:00Z, sunset interval is excluded
//! assert!(!year.is_daylight(1_735_768_800).unwrap());
//! ```

use serde::{Deserialize, Serialize};

pub mod bits;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod partial;
pub mod query;
pub mod simulate;
pub mod year;


pub use error::DaylightError;
pub use partial::{load_day, locate, Fragment, SparseYear};
pub use year::PackedYear;

/// Length of one interval in minutes.
pub const INTERVAL_MINUTES: u32 = 15;
/// Number of intervals in a UTC day; valid indices are `0..INTERVALS_PER_DAY`.
pub const INTERVALS_PER_DAY: u8 = 96;
/// Days in the fixed reference cycle.
pub const DAYS_IN_YEAR: u16 = 365;
/// Bits used to store one interval index (0–127).
pub const BITS_PER_INDEX: u32 = 7;
/// Bits used to store one day: sunset index in the high half, sunrise in the low half.
pub const BITS_PER_DAY: u32 = BITS_PER_INDEX * 2;
/// Mask selecting one interval index.
pub const INDEX_MASK: u16 = (1 << BITS_PER_INDEX) - 1;
/// Mask selecting one day segment.
pub const SEGMENT_MASK: u16 = (1 << BITS_PER_DAY) - 1;
/// Significant bits in a packed year.
pub const PAYLOAD_BITS: usize = DAYS_IN_YEAR as usize * BITS_PER_DAY as usize;
/// Exported length of a packed year in bytes.
pub const PACKED_LEN: usize = PAYLOAD_BITS.div_ceil(8);
/// Zero bits ahead of day 0 in the exported buffer.
pub const LEAD_PAD_BITS: usize = PACKED_LEN * 8 - PAYLOAD_BITS;
/// Calendar year whose Jan 1 is day 0.
pub const REFERENCE_YEAR: i32 = 2025;
/// 2025-01-01T00:00:00Z as Unix seconds.
pub const REFERENCE_EPOCH: i64 = 1_735_689_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// One raw daily record as produced by the upstream sun-times scraper.
///
/// All times are UTC clock strings. Malformed strings are tolerated and
/// encode as interval 0.
///
/// # Example
/// ```
/// use daylight_mask::DailyEntry;
///
/// let json = r#"{"date":"06-21","sunrise":"09:15","sunset":"04:30"}"#;
/// let entry: DailyEntry = serde_json::from_str(json).unwrap();
/// assert_eq!(entry.date, "06-21");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Calendar day as `"MM-DD"`
    pub date: String,
    /// Sunrise as `"HH:MM"` UTC
    pub sunrise: String,
    /// Sunset as `"HH:MM"` UTC
    pub sunset: String,
}

impl DailyEntry {
    pub fn new(date: &str, sunrise: &str, sunset: &str) -> Self {
        DailyEntry {
            date: date.to_string(),
            sunrise: sunrise.to_string(),
            sunset: sunset.to_string(),
        }
    }
}

/// One day's decoded schedule.
///
/// Both indices are 15-minute interval offsets from UTC midnight. Daylight is
/// the half-open range `[sunrise_index, sunset_index)`; a window whose sunset
/// does not come after its sunrise is never daylight.
///
/// Memory layout: two `u8`s, 2 bytes total. On disk a window occupies 14 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaylightWindow {
    /// First daylight interval (inclusive)
    pub sunrise_index: u8,
    /// First dark interval after daylight (exclusive)
    pub sunset_index: u8,
}

impl DaylightWindow {
    /// Build a window, clamping both indices to [`INTERVALS_PER_DAY`].
    pub fn new(sunrise_index: u8, sunset_index: u8) -> Self {
        DaylightWindow {
            sunrise_index: sunrise_index.min(INTERVALS_PER_DAY),
            sunset_index: sunset_index.min(INTERVALS_PER_DAY),
        }
    }

    /// Pack into a 14-bit segment: `(sunset << 7) | sunrise`.
    pub fn to_segment(self) -> u16 {
        let sunrise = u16::from(self.sunrise_index.min(INTERVALS_PER_DAY));
        let sunset = u16::from(self.sunset_index.min(INTERVALS_PER_DAY));
        (sunset << BITS_PER_INDEX) | sunrise
    }

    /// Unpack a 14-bit segment. Bits above the segment are ignored and
    /// out-of-range indices are clamped.
    pub fn from_segment(segment: u16) -> Self {
        let segment = segment & SEGMENT_MASK;
        DaylightWindow::new(
            (segment & INDEX_MASK) as u8,
            ((segment >> BITS_PER_INDEX) & INDEX_MASK) as u8,
        )
    }

    /// True when `interval` falls inside `[sunrise_index, sunset_index)`.
    pub fn contains(&self, interval: u8) -> bool {
        interval >= self.sunrise_index && interval < self.sunset_index
    }

    /// Number of daylight intervals in this window.
    pub fn daylight_intervals(&self) -> u8 {
        self.sunset_index.saturating_sub(self.sunrise_index)
    }
}
