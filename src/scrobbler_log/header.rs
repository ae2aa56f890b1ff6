//! Header directives at the top of a `.scrobbler.log`

/// Marker that must appear on line 0
pub const AUDIOSCROBBLER_HEADER: &str = "#AUDIOSCROBBLER/";

const TZ_DIRECTIVE: &str = "#TZ/";
const CLIENT_DIRECTIVE: &str = "#CLIENT/";

/// Time zone declared by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTimeZone {
    /// `#TZ/UNKNOWN`: local time of unknown zone
    Unknown,
    /// `#TZ/UTC`
    Utc,
    Other(String),
}

/// Information carried by the `#` lines of a log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogHeader {
    /// Format version (e.g. `1.1`)
    pub version: Option<String>,
    pub time_zone: Option<LogTimeZone>,
    /// Player identification (e.g. `Rockbox sansaclipplus $Revision$`)
    pub client: Option<String>,
}

impl LogHeader {
    /// Collect header directives from the given lines
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut header = Self::default();

        for line in lines {
            let line = line.trim_start_matches('\u{feff}').trim_end_matches('\r');
            if !is_header_line(line) {
                continue;
            }

            if let Some(pos) = line.find(AUDIOSCROBBLER_HEADER) {
                let version = &line[pos + AUDIOSCROBBLER_HEADER.len()..];
                header.version = Some(version.trim().to_string());
            } else if let Some(tz) = line.strip_prefix(TZ_DIRECTIVE) {
                header.time_zone = Some(match tz.trim() {
                    "UNKNOWN" => LogTimeZone::Unknown,
                    "UTC" => LogTimeZone::Utc,
                    other => LogTimeZone::Other(other.to_string()),
                });
            } else if let Some(client) = line.strip_prefix(CLIENT_DIRECTIVE) {
                header.client = Some(client.trim().to_string());
            }
        }

        header
    }

    /// True when the player claims to have written UTC timestamps
    pub fn declares_utc(&self) -> bool {
        self.time_zone == Some(LogTimeZone::Utc)
    }
}

/// Header and comment lines start with `#` and, unlike entries, carry no
/// field separator
pub fn is_header_line(line: &str) -> bool {
    line.starts_with('#') && !line.contains('\t')
}
