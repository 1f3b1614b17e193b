//! Verdict Parser - S-expression surface syntax for Verdict rulesets
//!
//! This crate converts between the s-expression form used by authoring
//! tools and tests and the Verdict AST:
//!
//! ```text
//! (ruleset string
//!   (rule (= (param "product-id" "string") "fr-paris") "matched")
//!   (rule #t "default"))
//! ```
//!
//! Parsing applies the same type and arity checks as the AST builders.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
mod symbols;

// Re-export main parser types
pub use error::{ParseError, Position, Result};
pub use lexer::{Lexer, Spanned, Token};
pub use parser::{ExpressionParser, RulesetParser};
pub use printer::{print_expression, print_ruleset};

use verdict_core::{Expression, Ruleset};

/// Parse a single expression
pub fn parse_expression(src: &str) -> Result<Expression> {
    ExpressionParser::parse(src)
}

/// Parse a `(ruleset T (rule cond result) ...)` form
pub fn parse_ruleset(src: &str) -> Result<Ruleset> {
    RulesetParser::parse(src)
}
