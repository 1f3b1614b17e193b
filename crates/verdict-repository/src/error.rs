//! Error types for the store layer

use std::path::PathBuf;
use thiserror::Error;
use verdict_core::{CoreError, ErrorKind};

/// Result type alias for store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No ruleset stored at key
    #[error("Ruleset not found: {key}")]
    NotFound { key: String },

    /// Key exists but not at the requested version
    #[error("Ruleset version not found: {key}@{version}")]
    VersionNotFound { key: String, version: String },

    /// Key cannot be mapped onto the backend
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Invalid root path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Caller cancelled the context
    #[error("Operation cancelled")]
    Cancelled,

    /// Context deadline passed
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is invalid, or a put violates a ruleset invariant
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::RulesetNotFound,
            RepositoryError::VersionNotFound { .. } => ErrorKind::RulesetVersionNotFound,
            RepositoryError::Cancelled => ErrorKind::Cancelled,
            RepositoryError::DeadlineExceeded => ErrorKind::Timeout,
            RepositoryError::Core(err) => err.kind(),
            RepositoryError::InvalidKey { .. }
            | RepositoryError::InvalidPath { .. }
            | RepositoryError::Io(_)
            | RepositoryError::Other(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        RepositoryError::NotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn version_not_found(key: &str, version: &str) -> Self {
        RepositoryError::VersionNotFound {
            key: key.to_string(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            RepositoryError::not_found("a").kind(),
            ErrorKind::RulesetNotFound
        );
        assert_eq!(
            RepositoryError::version_not_found("a", "3").kind(),
            ErrorKind::RulesetVersionNotFound
        );
        assert_eq!(RepositoryError::DeadlineExceeded.kind(), ErrorKind::Timeout);
        assert_eq!(
            RepositoryError::from(CoreError::signature("x")).kind(),
            ErrorKind::SignatureMismatch
        );
    }

    #[test]
    fn test_display() {
        let err = RepositoryError::version_not_found("rules/a", "7");
        assert_eq!(err.to_string(), "Ruleset version not found: rules/a@7");
    }
}
