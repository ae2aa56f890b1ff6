//! Error types for scrobbler log processing
//!
//! Import failures are fatal to the whole run. Line failures only concern
//! the line they were raised for; the caller decides whether to carry on.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file into a [`LogFile`](crate::scrobbler_log::LogFile)
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be opened or fully read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line 0 does not carry the `#AUDIOSCROBBLER/` marker
    #[error("{path:?} is not a valid .scrobbler.log (missing #AUDIOSCROBBLER/ header)")]
    InvalidFormat { path: PathBuf },
}

/// Outcome of a line that did not produce a track record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    /// Not a listen (rating other than `L`). Expected, not a failure.
    #[error("track was skipped (rating {rating:?})")]
    Skipped { rating: String },

    #[error("malformed line: expected at least {expected} fields, found {found}")]
    Malformed { found: usize, expected: usize },

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

impl LineError {
    /// Whether this outcome counts against the run
    pub fn is_failure(&self) -> bool {
        !matches!(self, LineError::Skipped { .. })
    }
}

/// Timestamp or offset text that cannot be interpreted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid timestamp {value:?}: not a whole number of seconds")]
    InvalidTimestamp { value: String },

    #[error("invalid offset {value:?}: {reason}")]
    InvalidOffset { value: String, reason: String },

    #[error("timestamp {value} is out of range after applying the offset")]
    OutOfRange { value: i64 },
}
