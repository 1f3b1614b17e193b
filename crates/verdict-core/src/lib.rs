//! Verdict Core - Core types and definitions for the Verdict rules engine
//!
//! This crate provides the fundamental types used across the Verdict ecosystem:
//! - Typed values and the type tags attached to every value
//! - Parameter sets supplied per evaluation
//! - The expression AST, with construction-time type checking
//! - Rules, rulesets and their signatures
//! - The JSON/YAML encoding persisted in stores
//! - Error types and the stable error taxonomy

pub mod ast;
pub mod error;
pub mod params;
pub mod signature;
pub mod types;

mod wire;

// Re-export commonly used types
pub use ast::{Expression, Operator, ParamRef, Rule, Ruleset};
pub use error::{CoreError, ErrorKind, Result};
pub use params::Params;
pub use signature::Signature;
pub use types::{Value, ValueType};
