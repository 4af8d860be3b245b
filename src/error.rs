//! Error types for the harvest library.

use thiserror::Error;

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Errors that can occur while searching, downloading, or writing output.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse embedded result metadata.
    #[error("Failed to parse result metadata: {0}")]
    Parse(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two queries in one batch resolved to the same label.
    #[error("Duplicate label '{0}' in batch")]
    DuplicateLabel(String),

    /// Invalid glob pattern in the batch target.
    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob expansion failed while reading a directory.
    #[error("Glob expansion failed: {0}")]
    Glob(#[from] glob::GlobError),
}

impl HarvestError {
    /// Returns true for transient network failures worth another attempt.
    ///
    /// Connection and timeout errors qualify; HTTP status errors, parse
    /// failures and plain filesystem errors do not.
    pub fn is_transient(&self) -> bool {
        match self {
            HarvestError::Http(e) => e.is_timeout() || e.is_connect(),
            HarvestError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_parse() {
        let err = HarvestError::Parse("invalid JSON".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to parse result metadata: invalid JSON"
        );
    }

    #[test]
    fn test_error_display_duplicate_label() {
        let err = HarvestError::DuplicateLabel("shiba_inu".to_string());
        assert_eq!(err.to_string(), "Duplicate label 'shiba_inu' in batch");
    }

    #[test]
    fn test_error_display_io() {
        let err = HarvestError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_error_from_url_parse() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = HarvestError::from(parse_err);
        assert!(matches!(err, HarvestError::UrlParse(_)));
    }

    #[test]
    fn test_parse_error_is_not_transient() {
        let err = HarvestError::Parse("bad".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_duplicate_label_is_not_transient() {
        let err = HarvestError::DuplicateLabel("x".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_timeout_is_transient() {
        let err = HarvestError::Io(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_io_connection_refused_is_transient() {
        let err = HarvestError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_io_not_found_is_not_transient() {
        let err = HarvestError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_error_debug() {
        let err = HarvestError::Parse("oops".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Parse"));
    }
}
