use serde::{Deserialize, Serialize};

/// A single completed listen, normalized for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Artist name
    pub artist: String,

    /// Album name (may be empty, the log leaves it blank when unknown)
    pub album: String,

    /// Track title
    pub title: String,

    /// Time of the listen in UTC epoch seconds
    pub timestamp: i64,
}

impl TrackRecord {
    /// Timestamp as the base-10 string scrobbling APIs expect
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_string() {
        let track = TrackRecord {
            artist: "Muse".to_string(),
            album: "Absolution".to_string(),
            title: "Hysteria".to_string(),
            timestamp: 1_000_000_000,
        };

        assert_eq!(track.timestamp_string(), "1000000000");
    }
}
