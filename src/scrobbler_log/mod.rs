//! Rockbox `.scrobbler.log` reading
//!
//! Loads the Audioscrobbler portable log written by Rockbox and similar
//! players, decodes its entry lines and corrects their timestamps to UTC.

mod header;
mod importer;
mod line;
mod timestamp;

pub use header::{LogHeader, LogTimeZone, AUDIOSCROBBLER_HEADER};
pub use importer::{import_log, LogFile};
pub use line::{parse_line, parse_line_at, LogLine, LISTENED, TIMESTAMP_NO_RTC};
pub use timestamp::{correct_timestamp, parse_epoch_seconds, to_utc, TimeOffset};

use crate::error::{ImportError, LineError};
use crate::model::TrackRecord;
use std::path::Path;

/// Import a log and parse all of its entries
///
/// Import failures are returned as the outer error. Each entry's own outcome
/// is returned alongside its 1-based line number, in file order.
pub fn parse_log(
    path: &Path,
    offset: &TimeOffset,
) -> Result<Vec<(usize, Result<TrackRecord, LineError>)>, ImportError> {
    log::info!("Parsing scrobbler log from {:?}", path);
    let log = import_log(path)?;

    let results: Vec<_> = log
        .entries()
        .map(|(number, line)| (number, parse_line(line, offset)))
        .collect();

    log::info!(
        "Parsed {} entries, {} listens",
        results.len(),
        results.iter().filter(|(_, r)| r.is_ok()).count()
    );

    Ok(results)
}
