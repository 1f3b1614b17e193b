//! Verdict Runtime - Evaluation engine for Verdict rulesets
//!
//! This crate walks a validated [`Ruleset`](verdict_core::Ruleset) against a
//! parameter set and returns the result of the first matching rule.
//! Evaluation is pure: no I/O, no shared state, and the parameter set is
//! only read.

pub mod engine;
pub mod error;

// Re-export main types
pub use engine::{Evaluation, Evaluator};
pub use error::{Result, RuntimeError};
