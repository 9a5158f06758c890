//! Error types for webdesk.

use thiserror::Error;

/// Main error type for webdesk operations.
///
/// Shell command failures (missing files, escaped paths, unknown verbs) are
/// not errors at this level: they degrade to in-band text returned to the
/// caller. This type covers the faults the transport translates into generic
/// failure responses.
#[derive(Error, Debug)]
pub enum WebDeskError {
    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The configured web root does not exist or is not a directory.
    #[error("invalid web root: {0}")]
    InvalidRoot(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Convenience Result type for webdesk operations.
pub type Result<T> = std::result::Result<T, WebDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_display() {
        let err = WebDeskError::SessionNotFound("term-00000001".into());
        assert!(err.to_string().contains("term-00000001"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_root_display() {
        let err = WebDeskError::InvalidRoot("/no/such/dir".into());
        assert!(err.to_string().contains("/no/such/dir"));
        assert!(err.to_string().contains("invalid web root"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let desk_err: WebDeskError = io_err.into();
        assert!(matches!(desk_err, WebDeskError::Io(_)));
        assert!(desk_err.to_string().contains("I/O error"));
    }
}
