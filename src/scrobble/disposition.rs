//! Keeping or deleting the log after a run
//!
//! Players append to the log forever, so once its listens are submitted the
//! user usually wants it gone. Returns a process exit code.

use anyhow::Result;
use clap::ValueEnum;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// What happens to the log file after processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FileDisposition {
    /// Prompt on the terminal
    #[default]
    #[value(skip)]
    Ask,

    /// Leave the file in place
    Keep,

    /// Delete the file unconditionally
    Delete,

    /// Delete the file only if nothing failed
    DeleteOnSuccess,
}

/// Apply `disposition` to the log at `path`
///
/// `failures` is the run's failure count. `input` is only read for
/// [`FileDisposition::Ask`]; messages go to `output`.
pub fn handle_file<R: BufRead, W: Write>(
    path: &Path,
    disposition: FileDisposition,
    failures: usize,
    input: &mut R,
    output: &mut W,
) -> Result<i32> {
    let exit_code = match disposition {
        FileDisposition::Keep => {
            writeln!(output, "{:?} kept", path)?;
            0
        }

        FileDisposition::Delete => delete_log_file(path, output)?,

        FileDisposition::DeleteOnSuccess => {
            if failures == 0 {
                delete_log_file(path, output)?
            } else {
                writeln!(output, "Scrobble failures: {:?} not deleted.", path)?;
                1
            }
        }

        FileDisposition::Ask => {
            write!(output, "Delete {:?}? [y/n] ", path)?;
            output.flush()?;

            let mut answer = String::new();
            let read = input.read_line(&mut answer);
            writeln!(output)?;

            match read {
                Err(e) => {
                    writeln!(
                        output,
                        "Error reading input! File {:?} not deleted.\n{}",
                        path, e
                    )?;
                    1
                }
                Ok(_) if answer.contains(&['y', 'Y'][..]) => delete_log_file(path, output)?,
                Ok(_) => {
                    writeln!(output, "{:?} kept.", path)?;
                    0
                }
            }
        }
    };

    Ok(exit_code)
}

fn delete_log_file<W: Write>(path: &Path, output: &mut W) -> Result<i32> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed {:?}", path);
            writeln!(output, "{:?} Deleted!", path)?;
            Ok(0)
        }
        Err(e) => {
            log::error!("Failed to delete {:?}: {}", path, e);
            writeln!(output, "Error Deleting {:?}!\n{}", path, e)?;
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn log_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join(".scrobbler.log");
        fs::write(&path, "#AUDIOSCROBBLER/1.1\n").unwrap();
        path
    }

    fn run(
        path: &Path,
        disposition: FileDisposition,
        failures: usize,
        answer: &str,
    ) -> (i32, String) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let code = handle_file(path, disposition, failures, &mut input, &mut output).unwrap();
        (code, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_keep() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir);

        let (code, out) = run(&path, FileDisposition::Keep, 3, "");
        assert_eq!(code, 0);
        assert!(out.contains("kept"));
        assert!(path.exists());
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir);

        let (code, _) = run(&path, FileDisposition::Delete, 3, "");
        assert_eq!(code, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.log");

        let (code, out) = run(&path, FileDisposition::Delete, 0, "");
        assert_eq!(code, 1);
        assert!(out.contains("Error Deleting"));
    }

    #[test]
    fn test_delete_on_success() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir);

        let (code, out) = run(&path, FileDisposition::DeleteOnSuccess, 1, "");
        assert_eq!(code, 1);
        assert!(out.contains("not deleted"));
        assert!(path.exists());

        let (code, _) = run(&path, FileDisposition::DeleteOnSuccess, 0, "");
        assert_eq!(code, 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_ask_yes() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir);

        let (code, out) = run(&path, FileDisposition::Ask, 0, "Yes\n");
        assert_eq!(code, 0);
        assert!(out.starts_with("Delete"));
        assert!(!path.exists());
    }

    #[test]
    fn test_ask_no() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir);

        let (code, out) = run(&path, FileDisposition::Ask, 0, "n\n");
        assert_eq!(code, 0);
        assert!(out.contains("kept."));
        assert!(path.exists());

        // End of input counts as "no"
        let (code, _) = run(&path, FileDisposition::Ask, 0, "");
        assert_eq!(code, 0);
        assert!(path.exists());
    }
}
