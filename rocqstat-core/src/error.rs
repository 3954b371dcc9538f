//! Typed error handling for rocqstat.
//!
//! The scanner itself never fails: every degraded outcome becomes a partial
//! record or a warning. These errors cover the edges of the library where a
//! caller has to decide what to do (reading exports, parsing options).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rocqstat operations.
#[derive(Error, Debug)]
pub enum RocqstatError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A serialized declaration export could not be decoded
    #[error("Invalid export at {path}: {message}")]
    Deserialize { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RocqstatError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an export decoding error.
    pub fn deserialize(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Deserialize {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::Deserialize { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for rocqstat results.
pub type RocqstatResult<T> = Result<T, RocqstatError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> RocqstatResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> RocqstatResult<T> {
        self.map_err(|e| RocqstatError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = RocqstatError::io(
            PathBuf::from("/proofs/Nat.v"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, RocqstatError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/proofs/Nat.v")));
        assert!(err.to_string().contains("/proofs/Nat.v"));
    }

    #[test]
    fn test_invalid_argument_has_no_path() {
        let err = RocqstatError::invalid_argument("unknown kind");
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "Invalid argument: unknown kind");
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let converted = result.with_path("/missing/File.v");
        assert!(matches!(converted, Err(RocqstatError::Io { .. })));
    }
}
