//! Parser error types

use std::fmt;
use thiserror::Error;
use verdict_core::{CoreError, ErrorKind};

/// Location in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Invalid token
    #[error("lex error at {position}: {message}")]
    Lex { message: String, position: Position },

    /// Well-formed tokens in an invalid arrangement
    #[error("parse error at {position}: {message}")]
    Syntax { message: String, position: Position },

    /// Form is syntactically valid but ill-typed
    #[error("signature mismatch at {position}: {source}")]
    Signature {
        source: CoreError,
        position: Position,
    },
}

impl ParseError {
    pub(crate) fn lex(message: impl Into<String>, position: Position) -> Self {
        ParseError::Lex {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, position: Position) -> Self {
        ParseError::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex { position, .. }
            | ParseError::Syntax { position, .. }
            | ParseError::Signature { position, .. } => *position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex { .. } => ErrorKind::LexError,
            ParseError::Syntax { .. } => ErrorKind::ParseError,
            ParseError::Signature { source, .. } => source.kind(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
