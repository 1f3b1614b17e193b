//! Runtime error types

use thiserror::Error;
use verdict_core::{CoreError, ErrorKind};

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Parameter lookup failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No rule condition held
    #[error("No rule matched")]
    NoMatch,

    /// Integer division or remainder by zero
    #[error("Division by zero in '{0}'")]
    DivisionByZero(&'static str),

    /// Integer result outside the int64 range
    #[error("Integer overflow in '{0}'")]
    Overflow(&'static str),

    /// Operand value does not carry the type its node declared
    #[error("Type error: {0}")]
    TypeError(String),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Core(err) => err.kind(),
            RuntimeError::NoMatch => ErrorKind::NoMatch,
            RuntimeError::DivisionByZero(_) | RuntimeError::Overflow(_) => ErrorKind::Arithmetic,
            RuntimeError::TypeError(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
