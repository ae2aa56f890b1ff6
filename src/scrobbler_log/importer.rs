//! `.scrobbler.log` file loading and validation

use super::header::{is_header_line, LogHeader, AUDIOSCROBBLER_HEADER};
use crate::error::ImportError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Line separator of the format. `\r` is not stripped.
pub const NEWLINE: char = '\n';

/// A validated log, split into its raw lines
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
    lines: Vec<String>,
    header: LogHeader,
    /// Index of the first line after the leading `#` block
    header_end: usize,
}

impl LogFile {
    /// Split and validate already-loaded log text
    pub fn from_text(path: &Path, text: &str) -> Result<Self, ImportError> {
        let lines: Vec<String> = text.split(NEWLINE).map(str::to_string).collect();

        // split() always yields at least one (possibly empty) line
        if !lines[0].contains(AUDIOSCROBBLER_HEADER) {
            return Err(ImportError::InvalidFormat {
                path: path.to_path_buf(),
            });
        }

        // Only the directive lines directly after line 0 are header; anything
        // after the first entry is an entry, whatever it starts with
        let header_end = 1 + lines[1..]
            .iter()
            .take_while(|line| is_header_line(line))
            .count();
        let header = LogHeader::from_lines(lines[..header_end].iter().map(String::as_str));

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            header,
            header_end,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Every raw line, header included, in file order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Entry lines with their 1-based line number
    ///
    /// The header block and empty lines are left out.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(self.header_end)
            .filter(|(_, line)| !line.is_empty())
            .map(|(index, line)| (index + 1, line.as_str()))
    }

    /// Number of entry lines
    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }
}

/// Read the log at `path` into memory and check its header
///
/// The file handle is dropped before returning, on every path.
pub fn import_log(path: &Path) -> Result<LogFile, ImportError> {
    let io_error = |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = {
        let mut file = File::open(path).map_err(io_error)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(io_error)?;
        bytes
    };

    let text = String::from_utf8_lossy(&bytes);
    let log = LogFile::from_text(path, &text)?;

    log::debug!(
        "Imported {:?}: {} lines, {} entries",
        path,
        log.lines().len(),
        log.entry_count()
    );

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrobbler_log::LogTimeZone;
    use std::fs;
    use tempfile::TempDir;

    const LOG: &str = "#AUDIOSCROBBLER/1.1\n\
                       #TZ/UNKNOWN\n\
                       #CLIENT/Rockbox ipodvideo $Revision$\n\
                       Muse\tAbsolution\tHysteria\t3\t227\tL\t1000000000\t\n\
                       Muse\tAbsolution\tTime Is Running Out\t4\t237\tS\t1000000300\t\n";

    #[test]
    fn test_import_valid_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".scrobbler.log");
        fs::write(&path, LOG).unwrap();

        let log = import_log(&path).unwrap();

        // Trailing newline yields an empty final line
        assert_eq!(log.lines().len(), 6);
        assert_eq!(log.lines()[5], "");
        assert_eq!(log.entry_count(), 2);
        assert_eq!(log.header().version.as_deref(), Some("1.1"));
        assert_eq!(log.path(), path.as_path());
    }

    #[test]
    fn test_entries_are_numbered_from_one() {
        let log = LogFile::from_text(Path::new("test.log"), LOG).unwrap();
        let numbers: Vec<usize> = log.entries().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![4, 5]);
    }

    #[test]
    fn test_hash_prefixed_artist_is_an_entry() {
        let text = "#AUDIOSCROBBLER/1.1\n\
                    #TZ/UNKNOWN\n\
                    #1 Dads\tAbout Face\tSo Soldier\t1\t200\tL\t1000000000\n\
                    Muse\tAbsolution\tHysteria\t3\t227\tL\t1000000000\n";
        let log = LogFile::from_text(Path::new("test.log"), text).unwrap();

        let entries: Vec<(usize, &str)> = log.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, 3);
        assert!(entries[0].1.starts_with("#1 Dads\t"));
        assert_eq!(log.header().time_zone, Some(LogTimeZone::Unknown));
    }

    #[test]
    fn test_hash_line_after_first_entry_is_an_entry() {
        let text = "#AUDIOSCROBBLER/1.1\n\
                    Muse\tAbsolution\tHysteria\t3\t227\tL\t1000000000\n\
                    #comment\n";
        let log = LogFile::from_text(Path::new("test.log"), text).unwrap();

        let numbers: Vec<usize> = log.entries().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_carriage_returns_are_kept() {
        let text = "#AUDIOSCROBBLER/1.1\r\nA\tB\tC\t1\t2\tL\t3\r\n";
        let log = LogFile::from_text(Path::new("crlf.log"), text).unwrap();
        assert_eq!(log.lines()[0], "#AUDIOSCROBBLER/1.1\r");
        assert_eq!(log.lines()[1], "A\tB\tC\t1\t2\tL\t3\r");
    }

    #[test]
    fn test_marker_may_appear_anywhere_on_first_line() {
        let text = "\u{feff}#AUDIOSCROBBLER/1.0\n";
        let log = LogFile::from_text(Path::new("x"), text).unwrap();
        assert_eq!(log.entry_count(), 0);
        assert_eq!(log.header().version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let text = "Muse\tAbsolution\tHysteria\t3\t227\tL\t1000000000\n#AUDIOSCROBBLER/1.1\n";
        let err = LogFile::from_text(Path::new("bad.log"), text).unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat { .. }));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.log");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            import_log(&path),
            Err(ImportError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = import_log(&dir.path().join("nope.log")).unwrap_err();
        match err {
            ImportError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_import_does_not_touch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".scrobbler.log");
        fs::write(&path, LOG).unwrap();

        import_log(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), LOG);
    }
}
