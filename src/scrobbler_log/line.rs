//! Entry line decoding
//!
//! An entry is a tab-separated record:
//! `artist \t album \t title \t track# \t duration \t rating \t timestamp [\t mbid]`

use super::timestamp::{parse_epoch_seconds, to_utc, TimeOffset};
use crate::error::LineError;
use crate::model::TrackRecord;
use chrono::{DateTime, Utc};

pub const SEPARATOR: char = '\t';

/// Rating of a fully played track
pub const LISTENED: &str = "L";

/// Timestamp written by players without a real-time clock
pub const TIMESTAMP_NO_RTC: &str = "0";

const ARTIST_INDEX: usize = 0;
const ALBUM_INDEX: usize = 1;
const TITLE_INDEX: usize = 2;
const RATING_INDEX: usize = 5;
const TIMESTAMP_INDEX: usize = 6;

/// Fields required for a line to be decodable
pub const REQUIRED_FIELDS: usize = TIMESTAMP_INDEX + 1;

/// The fields of one entry line, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub artist: &'a str,
    pub album: &'a str,
    pub title: &'a str,
    pub rating: &'a str,
    pub timestamp: &'a str,
}

impl<'a> LogLine<'a> {
    /// Split a line into its fields, refusing lines that are too short
    pub fn decode(line: &'a str) -> Result<Self, LineError> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();

        if fields.len() < REQUIRED_FIELDS {
            return Err(LineError::Malformed {
                found: fields.len(),
                expected: REQUIRED_FIELDS,
            });
        }

        Ok(Self {
            artist: fields[ARTIST_INDEX],
            album: fields[ALBUM_INDEX],
            title: fields[TITLE_INDEX],
            rating: fields[RATING_INDEX],
            timestamp: fields[TIMESTAMP_INDEX],
        })
    }

    /// Only the rating column decides; titles containing "L" don't count
    pub fn is_listen(&self) -> bool {
        self.rating == LISTENED
    }
}

/// Turn one entry line into a track record, using the current time for
/// clockless players
pub fn parse_line(line: &str, offset: &TimeOffset) -> Result<TrackRecord, LineError> {
    parse_line_at(line, offset, Utc::now())
}

/// Like [`parse_line`], with the substitute time for clockless players given
pub fn parse_line_at(
    line: &str,
    offset: &TimeOffset,
    now: DateTime<Utc>,
) -> Result<TrackRecord, LineError> {
    let fields = LogLine::decode(line)?;

    if !fields.is_listen() {
        return Err(LineError::Skipped {
            rating: fields.rating.to_string(),
        });
    }

    // Scrobbling services refuse listens dated 1970, date them "now" instead
    let mut timestamp = if fields.timestamp == TIMESTAMP_NO_RTC {
        now.timestamp()
    } else {
        parse_epoch_seconds(fields.timestamp)?
    };

    if !offset.is_zero() {
        timestamp = to_utc(timestamp, offset)?;
    }

    Ok(TrackRecord {
        artist: fields.artist.to_string(),
        album: fields.album.to_string(),
        title: fields.title.to_string(),
        timestamp,
    })
}
