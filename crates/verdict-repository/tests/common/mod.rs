//! Shared fixtures for store tests

#![allow(dead_code)]

use verdict_core::ast::{Expression, Rule};
use verdict_core::{Ruleset, ValueType};

/// `(ruleset string (rule (eq (param "product-id" "string") <id>) <result>))`
pub fn product_ruleset(id: &str, result: &str) -> Ruleset {
    Ruleset::new(
        ValueType::String,
        vec![Rule::new(
            Expression::eq(vec![
                Expression::string_param("product-id"),
                Expression::literal(id),
            ])
            .unwrap(),
            Expression::literal(result),
        )
        .unwrap()],
    )
    .unwrap()
}

/// Same parameter name as [`product_ruleset`], but typed int64
pub fn conflicting_ruleset() -> Ruleset {
    Ruleset::new(
        ValueType::String,
        vec![Rule::new(
            Expression::gt(Expression::int64_param("product-id"), Expression::literal(0i64))
                .unwrap(),
            Expression::literal("x"),
        )
        .unwrap()],
    )
    .unwrap()
}

/// Ruleset with a different result type
pub fn bool_ruleset() -> Ruleset {
    Ruleset::new(
        ValueType::Bool,
        vec![Rule::new(Expression::literal(true), Expression::literal(true)).unwrap()],
    )
    .unwrap()
}
