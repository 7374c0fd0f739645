//! Error types for filecontent.
//!
//! Reconciliation can fail in exactly two ways once a request is valid: the
//! target exists but cannot be read, or it cannot be written. Everything else
//! here belongs to the argument boundary in front of the reconciler.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for filecontent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for filecontent.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Reconciliation Errors
    // ========================================================================
    /// The target exists but its content could not be read as text.
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        /// Path to the target file
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The target could not be created, truncated or written.
    #[error("File write error {}: {source}", path.display())]
    Write {
        /// Path to the target file
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Boundary Errors
    // ========================================================================
    /// The request is malformed (e.g. an empty path).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Module arguments were not valid JSON or did not match the schema.
    #[error("Invalid module arguments: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error outside of the reconciliation itself.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns the target path when the error is tied to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Read { path, .. } | Error::Write { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns true if the error came from touching the target file.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Error::Read { .. } | Error::Write { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error_message_embeds_path_and_cause() {
        let err = Error::read(
            "/etc/motd",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Error reading file /etc/motd: "));
        assert!(msg.contains("Permission denied"));
        assert_eq!(err.path(), Some(Path::new("/etc/motd")));
        assert!(err.is_io_failure());
    }

    #[test]
    fn test_write_error_message() {
        let err = Error::write(
            "/nope/out.txt",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(
            err.to_string(),
            "File write error /nope/out.txt: No such file or directory"
        );
    }

    #[test]
    fn test_boundary_errors_have_no_path() {
        let err = Error::InvalidRequest("path must not be empty".into());
        assert!(err.path().is_none());
        assert!(!err.is_io_failure());
    }
}
