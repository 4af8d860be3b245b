//! CSV audit log for one query's run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::{Result, ResultEntry};

/// Writes the per-query CSV audit file.
///
/// Schema: `No.,url,is_downloaded`, one row per collected URL in index
/// order, with the flag rendered as `1`/`0`. An existing file at the same
/// path is overwritten.
pub struct RunLogger {
    path: PathBuf,
}

impl RunLogger {
    /// Creates a logger writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes the header and one row per entry.
    pub fn write(&self, entries: &[ResultEntry]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "No.,url,is_downloaded")?;
        for entry in entries {
            writeln!(
                out,
                "{},{},{}",
                entry.index,
                csv_field(&entry.url),
                if entry.downloaded { 1 } else { 0 }
            )?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Quotes a field only when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &std::path::Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_write_empty_run_has_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("corgi.csv");

        RunLogger::new(&path).write(&[]).unwrap();
        assert_eq!(read(&path), "No.,url,is_downloaded\n");
    }

    #[test]
    fn test_write_rows_in_index_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("corgi.csv");

        let entries = vec![
            ResultEntry::new(1, "http://a/1.jpg", true),
            ResultEntry::new(2, "http://a/2.jpg", false),
            ResultEntry::new(3, "http://a/3.jpg", true),
        ];
        RunLogger::new(&path).write(&entries).unwrap();

        assert_eq!(
            read(&path),
            "No.,url,is_downloaded\n\
             1,http://a/1.jpg,1\n\
             2,http://a/2.jpg,0\n\
             3,http://a/3.jpg,1\n"
        );
    }

    #[test]
    fn test_write_quotes_url_with_comma() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("corgi.csv");

        let entries = vec![ResultEntry::new(1, "http://a/1,big.jpg", true)];
        RunLogger::new(&path).write(&entries).unwrap();

        assert_eq!(
            read(&path),
            "No.,url,is_downloaded\n1,\"http://a/1,big.jpg\",1\n"
        );
    }

    #[test]
    fn test_write_doubles_embedded_quotes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("corgi.csv");

        let entries = vec![ResultEntry::new(1, "http://a/\"x\".jpg", false)];
        RunLogger::new(&path).write(&entries).unwrap();

        assert_eq!(
            read(&path),
            "No.,url,is_downloaded\n1,\"http://a/\"\"x\"\".jpg\",0\n"
        );
    }

    #[test]
    fn test_write_overwrites_previous_run() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("corgi.csv");
        let logger = RunLogger::new(&path);

        logger
            .write(&[
                ResultEntry::new(1, "http://a/1.jpg", true),
                ResultEntry::new(2, "http://a/2.jpg", true),
            ])
            .unwrap();
        logger
            .write(&[ResultEntry::new(1, "http://b/1.jpg", false)])
            .unwrap();

        assert_eq!(read(&path), "No.,url,is_downloaded\n1,http://b/1.jpg,0\n");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("corgi.csv");

        let result = RunLogger::new(&path).write(&[]);
        assert!(result.is_err());
    }
}
