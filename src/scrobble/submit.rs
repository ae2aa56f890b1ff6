//! Track submission
//!
//! The pipeline hands each accepted listen to a [`Scrobbler`]. The network
//! client for the remote service plugs in behind the same trait.

use crate::model::TrackRecord;
use anyhow::{Context, Result};
use std::io::Write;

/// Submission backend - allows swapping between dry-run, file and network sinks
pub trait Scrobbler {
    /// Submit one listen. An error only fails this track.
    fn scrobble(&mut self, track: &TrackRecord) -> Result<()>;
}

/// Scrobbler that only logs what would be submitted
#[derive(Debug, Default)]
pub struct DryRunScrobbler {
    submitted: Vec<TrackRecord>,
}

impl DryRunScrobbler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks received so far, in submission order
    pub fn submitted(&self) -> &[TrackRecord] {
        &self.submitted
    }
}

impl Scrobbler for DryRunScrobbler {
    fn scrobble(&mut self, track: &TrackRecord) -> Result<()> {
        log::info!(
            "Would scrobble: {} - {} [{}] @ {}",
            track.artist,
            track.title,
            track.album,
            track.timestamp
        );
        self.submitted.push(track.clone());
        Ok(())
    }
}

/// Scrobbler writing one JSON object per track
pub struct JsonLinesScrobbler<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesScrobbler<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Scrobbler for JsonLinesScrobbler<W> {
    fn scrobble(&mut self, track: &TrackRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, track)
            .with_context(|| format!("Failed to serialize track: {}", track.title))?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write track record")?;
        Ok(())
    }
}
