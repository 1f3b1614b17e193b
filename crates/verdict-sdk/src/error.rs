//! SDK error types

use thiserror::Error;
use verdict_core::{ErrorKind, ValueType};
use verdict_repository::RepositoryError;
use verdict_runtime::RuntimeError;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching the ruleset failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Evaluating the ruleset failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A typed getter was used on a ruleset returning another type
    #[error("Type mismatch: ruleset returns {actual}, requested {expected}")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::Config(_) => ErrorKind::Internal,
            SdkError::Repository(err) => err.kind(),
            SdkError::Runtime(err) => err.kind(),
            SdkError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }
}

impl From<config::ConfigError> for SdkError {
    fn from(err: config::ConfigError) -> Self {
        SdkError::Config(err.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
