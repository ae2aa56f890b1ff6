//! Main scrobble pipeline orchestration

use super::config::ScrobbleConfig;
use super::submit::Scrobbler;
use crate::error::LineError;
use crate::scrobbler_log::{import_log, parse_line, LogFile};
use anyhow::{Context, Result};

/// Counts of what happened to each entry of a log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrobbleSummary {
    /// Listens accepted by the scrobbler
    pub submitted: usize,

    /// Entries that were not listens
    pub skipped: usize,

    /// Entries that could not be decoded (too few fields, bad timestamp)
    pub invalid: usize,

    /// Listens the scrobbler rejected
    pub failed: usize,
}

impl ScrobbleSummary {
    /// Everything that went wrong, as reported to the file disposition step
    pub fn failures(&self) -> usize {
        self.invalid + self.failed
    }
}

/// Main scrobble pipeline
pub struct ScrobblePipeline<S: Scrobbler> {
    config: ScrobbleConfig,
    scrobbler: S,
}

impl<S: Scrobbler> ScrobblePipeline<S> {
    /// Create a new scrobble pipeline
    pub fn new(config: ScrobbleConfig, scrobbler: S) -> Self {
        Self { config, scrobbler }
    }

    pub fn config(&self) -> &ScrobbleConfig {
        &self.config
    }

    pub fn scrobbler(&self) -> &S {
        &self.scrobbler
    }

    pub fn into_scrobbler(self) -> S {
        self.scrobbler
    }

    /// Import the configured log and submit its listens in file order
    ///
    /// A log that cannot be read or is not a scrobbler log fails the whole
    /// run before anything is submitted.
    pub fn run(&mut self) -> Result<ScrobbleSummary> {
        log::info!("Starting scrobble of {:?}", self.config.log_path);
        log::info!("Time offset: {}", self.config.offset);

        let log = import_log(&self.config.log_path)
            .with_context(|| format!("Failed to import log: {:?}", self.config.log_path))?;

        self.process(&log)
    }

    /// Submit the listens of an already imported log
    pub fn process(&mut self, log: &LogFile) -> Result<ScrobbleSummary> {
        let header = log.header();
        if let Some(client) = &header.client {
            log::info!("Log written by: {}", client);
        }
        if header.declares_utc() && !self.config.offset.is_zero() {
            log::warn!(
                "Log declares UTC timestamps but offset {} will still be applied",
                self.config.offset
            );
        }

        let mut summary = ScrobbleSummary::default();
        let total = log.entry_count();

        for (i, (line_number, line)) in log.entries().enumerate() {
            let track = match parse_line(line, &self.config.offset) {
                Ok(track) => track,
                Err(LineError::Skipped { rating }) => {
                    log::debug!("Line {}: skipped (rating {:?})", line_number, rating);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    if self.config.strict {
                        return Err(e)
                            .with_context(|| format!("Invalid entry on line {}", line_number));
                    }
                    log::warn!("Line {}: {}", line_number, e);
                    summary.invalid += 1;
                    continue;
                }
            };

            log::debug!(
                "[{}/{}] Scrobbling: {} - {}",
                i + 1,
                total,
                track.artist,
                track.title
            );

            match self.scrobbler.scrobble(&track) {
                Ok(()) => summary.submitted += 1,
                Err(e) => {
                    log::error!(
                        "Failed to scrobble {} - {}: {:#}",
                        track.artist,
                        track.title,
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        log::info!(
            "Scrobble complete: {} submitted, {} skipped, {} invalid, {} failed",
            summary.submitted,
            summary.skipped,
            summary.invalid,
            summary.failed
        );

        Ok(summary)
    }
}
