//! Error types for Verdict Core

use crate::types::ValueType;
use std::fmt;
use thiserror::Error;

/// Stable classification of every failure the engine can report.
///
/// Each crate keeps its own error enum, but all of them map onto one of
/// these kinds through a `kind()` method so callers can branch on the
/// failure without knowing which layer produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Store has no value at key
    RulesetNotFound,
    /// Versioned lookup misses the requested version
    RulesetVersionNotFound,
    /// Evaluator references a parameter not in the set
    ParamNotFound,
    /// Parameter exists but has wrong type tag
    ParamTypeMismatch,
    /// Rule or expression construction violates arity/type rules
    SignatureMismatch,
    /// Evaluation completed with no rule matching
    NoMatch,
    /// Surface syntax or document decoding failure
    ParseError,
    /// Surface syntax tokenization failure
    LexError,
    /// Caller asked for a result type the ruleset does not produce
    TypeMismatch,
    /// Numeric domain fault (integer overflow, division by zero)
    Arithmetic,
    /// Caller cancelled the operation
    Cancelled,
    /// Operation exceeded its deadline
    Timeout,
    /// Transport, I/O or configuration failure
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::RulesetNotFound => "RulesetNotFound",
            ErrorKind::RulesetVersionNotFound => "RulesetVersionNotFound",
            ErrorKind::ParamNotFound => "ParamNotFound",
            ErrorKind::ParamTypeMismatch => "ParamTypeMismatch",
            ErrorKind::SignatureMismatch => "SignatureMismatch",
            ErrorKind::NoMatch => "NoMatch",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::LexError => "LexError",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::Arithmetic => "Arithmetic",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Internal => "Internal",
        };
        f.write_str(name)
    }
}

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Parameter not found: {0}")]
    ParamNotFound(String),

    #[error("Parameter type mismatch for '{name}': expected {expected}, got {actual}")]
    ParamTypeMismatch {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("Signature mismatch: {0}")]
    SignatureMismatch(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl CoreError {
    /// Build a signature mismatch from any displayable message
    pub fn signature(message: impl Into<String>) -> Self {
        CoreError::SignatureMismatch(message.into())
    }

    /// Stable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ParamNotFound(_) => ErrorKind::ParamNotFound,
            CoreError::ParamTypeMismatch { .. } => ErrorKind::ParamTypeMismatch,
            CoreError::SignatureMismatch(_) => ErrorKind::SignatureMismatch,
            CoreError::InvalidValue(_) | CoreError::Decode(_) => ErrorKind::ParseError,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
