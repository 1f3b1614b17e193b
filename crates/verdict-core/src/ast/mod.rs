//! Abstract Syntax Tree (AST) definitions for Verdict
//!
//! This module contains the AST node definitions for:
//! - Expressions and operators
//! - Rules
//! - Rulesets

pub mod expression;
pub mod operator;
pub mod rule;
pub mod ruleset;

pub use expression::{Expression, Operation, ParamRef};
pub use operator::{Arity, Operator};
pub use rule::Rule;
pub use ruleset::Ruleset;
