//! # Single-Day Partial Reads
//!
//! Answers one daylight query straight from a packed year file without loading
//! all 640 bytes.
//!
//! ## Why 2 or 3 Bytes
//! A day's 14-bit field starts at bit `10 + 14 * day` of the file. Because
//! 14 is not a multiple of 8 the field begins at bit 0, 2, 4 or 6 of some byte:
//!
//! ```text
//! start bit 0 or 2 → fits in 2 bytes   [xx######|########]
//! start bit 4 or 6 → needs 3 bytes     [....####|########|##......]
//! ```
//!
//! [`locate`] computes the smallest byte-aligned fragment covering the field,
//! [`load_day`] reads exactly that fragment, shifts off the trailing bits that
//! belong to the next day and re-embeds the segment into an otherwise empty
//! year. The result is a [`SparseYear`]: the normal query engine works on it,
//! but only for the day that was loaded.
//!
//! ## Concurrency
//! Every call opens its own file handle and only reads, so any number of
//! threads may call [`load_day`] on the same file at once.

use crate::{
    query::{day_bit_offset, day_index, now_timestamp},
    DaylightError, DaylightWindow, PackedYear, BITS_PER_DAY, SEGMENT_MASK,
};
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};
use tracing::debug;

/// Byte range in a packed year file holding one day's segment.
///
/// Only [`locate`] builds fragments, so the range always covers the day's
/// field and lies inside a 640-byte file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment {
    byte_offset: u64,
    fragment_size: usize,
    day_index: u16,
}

impl Fragment {
    /// First byte to read.
    pub fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    /// Number of bytes to read (2 or 3).
    pub fn fragment_size(&self) -> usize {
        self.fragment_size
    }

    /// Day index the fragment belongs to.
    pub fn day_index(&self) -> u16 {
        self.day_index
    }

    /// Bit offset of the day's field from the start of the file.
    pub fn bit_offset(&self) -> u64 {
        day_bit_offset(self.day_index) as u64
    }

    /// Right shift that moves the field to the low end of the fragment:
    /// bits after the fragment's end minus bits after the field's end.
    ///
    /// `None` if the fragment does not cover the field.
    pub fn shift(&self) -> Option<u32> {
        if self.bit_offset() < self.byte_offset.checked_mul(8)? {
            return None;
        }
        let fragment_end = self
            .byte_offset
            .checked_add(self.fragment_size as u64)?
            .checked_mul(8)?;
        let field_end = self.bit_offset() + u64::from(BITS_PER_DAY);
        let shift = fragment_end.checked_sub(field_end)?;
        u32::try_from(shift).ok()
    }

    /// Pull the 14-bit segment out of the bytes read at this fragment.
    ///
    /// `None` if the fragment does not cover the field, is wider than 4 bytes,
    /// or `bytes` is shorter than the fragment.
    pub fn segment_from(&self, bytes: &[u8]) -> Option<u16> {
        let window = bytes.get(..self.fragment_size)?;
        if window.len() > 4 {
            return None;
        }
        let value = window
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));
        let shifted = value.checked_shr(self.shift()?)?;
        Some((shifted as u16) & SEGMENT_MASK)
    }
}

/// Locate the bytes holding the day that contains `timestamp`, or the
/// current instant when `None`.
///
/// # Example
/// ```
/// use daylight_mask::{locate, REFERENCE_EPOCH};
///
/// // Jan 1: bits 10..24, bytes 1..=2
/// let jan1 = locate(Some(REFERENCE_EPOCH));
/// assert_eq!((jan1.byte_offset(), jan1.fragment_size(), jan1.day_index()), (1, 2, 0));
///
/// // Jan 2: bits 24..38, bytes 3..=4
/// let jan2 = locate(Some(REFERENCE_EPOCH + 86_400));
/// assert_eq!((jan2.byte_offset(), jan2.fragment_size()), (3, 2));
///
/// // Jan 3: bits 38..52, bytes 4..=6
/// let jan3 = locate(Some(REFERENCE_EPOCH + 2 * 86_400));
/// assert_eq!((jan3.byte_offset(), jan3.fragment_size()), (4, 3));
/// ```
pub fn locate(timestamp: Option<i64>) -> Fragment {
    let timestamp = timestamp.unwrap_or_else(now_timestamp);
    let day = day_index(timestamp);
    let bit_offset = day_bit_offset(day);
    let first_byte = bit_offset / 8;
    let last_byte = (bit_offset + BITS_PER_DAY as usize - 1) / 8;

    Fragment {
        byte_offset: first_byte as u64,
        fragment_size: last_byte - first_byte + 1,
        day_index: day,
    }
}

/// A packed year with exactly one day populated.
///
/// Queries for [`SparseYear::day_index`] answer exactly as the full year would.
/// Queries for any other day answer "not daylight".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseYear {
    year: PackedYear,
    day_index: u16,
}

impl SparseYear {
    /// The day whose segment was loaded.
    pub fn day_index(&self) -> u16 {
        self.day_index
    }

    /// The loaded day's window.
    pub fn window(&self) -> DaylightWindow {
        self.year.window(self.day_index).unwrap_or_default()
    }

    /// The underlying year, for callers that hand it to code expecting a
    /// [`PackedYear`].
    pub fn as_packed(&self) -> &PackedYear {
        &self.year
    }

    /// Whether `timestamp` lies in daylight; see [`PackedYear::is_daylight`].
    pub fn is_daylight(&self, timestamp: i64) -> Result<bool, DaylightError> {
        self.year.is_daylight(timestamp)
    }

    /// True when `timestamp` falls on the loaded day.
    pub fn covers(&self, timestamp: i64) -> bool {
        day_index(timestamp) == self.day_index
    }
}

/// Read just the bytes holding `timestamp`'s day from a packed year file.
///
/// # Errors
/// - [`DaylightError::NotFound`] if `path` does not exist
/// - [`DaylightError::Io`] if the seek or read fails, including a file too
///   short to contain the fragment
///
/// Failures are not retried.
///
/// # Example
/// ```no_run
/// use daylight_mask::load_day;
///
/// let now = chrono::Utc::now().timestamp();
/// let today = load_day("daylight.bin", Some(now))?;
/// println!("daylight: {}", today.is_daylight(now)?);
/// # Ok::<(), daylight_mask::DaylightError>(())
/// ```
pub fn load_day<P: AsRef<Path>>(
    path: P,
    timestamp: Option<i64>,
) -> Result<SparseYear, DaylightError> {
    let path = path.as_ref();
    let fragment = locate(timestamp);

    let mut file = File::open(path).map_err(|e| DaylightError::from_io(path, 0, e))?;
    file.seek(SeekFrom::Start(fragment.byte_offset))
        .map_err(|e| DaylightError::from_io(path, fragment.byte_offset, e))?;

    let mut buf = [0u8; 3];
    file.read_exact(&mut buf[..fragment.fragment_size])
        .map_err(|e| DaylightError::from_io(path, fragment.byte_offset, e))?;

    let segment = fragment.segment_from(&buf).ok_or_else(|| DaylightError::Io {
        path: path.to_path_buf(),
        offset: fragment.byte_offset,
        source: io::Error::new(io::ErrorKind::InvalidData, "fragment does not cover the day"),
    })?;
    debug!(
        "Read {} bytes at offset {} of {}: day {} segment {:#06x}",
        fragment.fragment_size,
        fragment.byte_offset,
        path.display(),
        fragment.day_index,
        segment
    );

    Ok(SparseYear {
        year: PackedYear::with_single_segment(fragment.day_index, segment),
        day_index: fragment.day_index,
    })
}
