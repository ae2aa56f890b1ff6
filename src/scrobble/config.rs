//! Scrobble run configuration

use super::disposition::FileDisposition;
use crate::scrobbler_log::TimeOffset;
use std::path::PathBuf;

/// Configuration for one run over a log file
#[derive(Debug, Clone)]
pub struct ScrobbleConfig {
    /// Path to the `.scrobbler.log`
    pub log_path: PathBuf,

    /// Offset of the log's local time to UTC
    pub offset: TimeOffset,

    /// What to do with the log once processed
    pub disposition: FileDisposition,

    /// Abort the run on the first malformed entry instead of counting it
    pub strict: bool,
}

impl ScrobbleConfig {
    /// Create a configuration for a UTC log, asking before deletion
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            offset: TimeOffset::utc(),
            disposition: FileDisposition::Ask,
            strict: false,
        }
    }

    /// Set the local time offset
    pub fn with_offset(mut self, offset: TimeOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_disposition(mut self, disposition: FileDisposition) -> Self {
        self.disposition = disposition;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
