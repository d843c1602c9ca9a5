//! # Dataset and Packed File I/O
//!
//! Two on-disk artifacts pass through this crate:
//!
//! - **Dataset** (`*.json`): the list of daily `{"date","sunrise","sunset"}`
//!   records produced by the upstream scraper. Serialized with `serde_json`.
//! - **Packed year** (`*.bin`): exactly 640 bytes, big-endian, no header.
//!   Written with [`PackedYear::export`] and read back with
//!   [`PackedYear::import`].
//!
//! Single-day reads that avoid loading the whole packed file live in
//! [`crate::partial`].

use crate::{DailyEntry, DaylightError, PackedYear};
use std::{fs, path::Path};
use tracing::info;

/// Load daily records from a JSON array file.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<DailyEntry>, DaylightError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| DaylightError::DatasetIo {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<DailyEntry> = serde_json::from_slice(&data)?;
    info!("Loaded {} daily records from {}", entries.len(), path.display());
    Ok(entries)
}

/// Save daily records as a pretty-printed JSON array.
pub fn save_entries<P: AsRef<Path>>(path: P, entries: &[DailyEntry]) -> Result<(), DaylightError> {
    let path = path.as_ref();
    let data = serde_json::to_vec_pretty(entries)?;
    fs::write(path, data).map_err(|source| DaylightError::DatasetIo {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {} daily records to {}", entries.len(), path.display());
    Ok(())
}

/// Export `year` and write the 640 bytes to `path`.
///
/// # Errors
/// [`DaylightError::Uninitialized`] before touching the file if `year` was
/// never populated.
pub fn write_packed_file<P: AsRef<Path>>(path: P, year: &PackedYear) -> Result<(), DaylightError> {
    let path = path.as_ref();
    let bytes = year.export()?;
    // A missing parent directory is a write failure, not a missing year
    fs::write(path, bytes).map_err(|source| DaylightError::Io {
        path: path.to_path_buf(),
        offset: 0,
        source,
    })?;
    info!("Wrote packed year ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// Read a whole packed year file.
pub fn read_packed_file<P: AsRef<Path>>(path: P) -> Result<PackedYear, DaylightError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| DaylightError::from_io(path, 0, e))?;
    PackedYear::import(&bytes)
}
