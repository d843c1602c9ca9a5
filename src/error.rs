//! # Error Types
//!
//! Every fallible operation in the library returns [`DaylightError`]. Malformed
//! clock strings are not errors: the encoder recovers from them locally.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors surfaced by encoding, persistence, partial reads and queries.
#[derive(Error, Debug)]
pub enum DaylightError {
    /// The year was never encoded or imported. Querying it would answer
    /// "never daylight" for every instant, which is indistinguishable from
    /// a real all-night schedule.
    #[error("packed year is not initialized")]
    Uninitialized,

    /// A buffer handed to import was not exactly one packed year long
    #[error("packed year must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The packed year file does not exist
    #[error("packed year file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Opening, seeking or reading a packed year file failed
    #[error("I/O error on {} at byte offset {offset}: {source}", path.display())]
    Io {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Reading or writing a dataset file failed
    #[error("dataset IO on {}: {source}", path.display())]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Dataset JSON could not be parsed or produced
    #[error("dataset format: {0}")]
    Dataset(#[from] serde_json::Error),
}

impl DaylightError {
    /// Map an `io::Error` raised while touching `path` at `offset`, turning
    /// `NotFound` into its own variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, offset: u64, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            DaylightError::NotFound { path }
        } else {
            DaylightError::Io {
                path,
                offset,
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_mapped() {
        let err = DaylightError::from_io(
            "/missing/year.bin",
            12,
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, DaylightError::NotFound { .. }));
        assert!(err.to_string().contains("/missing/year.bin"));
    }

    #[test]
    fn test_io_error_keeps_offset() {
        let err = DaylightError::from_io(
            "year.bin",
            637,
            io::Error::from(io::ErrorKind::UnexpectedEof),
        );
        match &err {
            DaylightError::Io { offset, .. } => assert_eq!(*offset, 637),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("637"));
    }
}
