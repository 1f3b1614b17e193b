//! Rule AST definitions
//!
//! A rule pairs a boolean condition with a result expression.

use crate::ast::Expression;
use crate::error::{CoreError, Result};
use crate::types::ValueType;
use crate::wire::RawRule;
use serde::{Deserialize, Serialize};

/// A condition and the result produced when it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct Rule {
    condition: Expression,
    result: Expression,
}

impl Rule {
    /// Create a rule. The condition must be of type bool.
    pub fn new(condition: Expression, result: Expression) -> Result<Self> {
        let actual = condition.value_type();
        if actual != ValueType::Bool {
            return Err(CoreError::signature(format!(
                "rule condition must be bool, got {}",
                actual
            )));
        }
        Ok(Self { condition, result })
    }

    pub fn condition(&self) -> &Expression {
        &self.condition
    }

    pub fn result(&self) -> &Expression {
        &self.result
    }

    /// Type of the value this rule returns when it matches
    pub fn result_type(&self) -> ValueType {
        self.result.value_type()
    }

    /// Structural identity, see [`Expression::same_as`]
    pub fn same_as(&self, other: &Rule) -> bool {
        self.condition.same_as(&other.condition) && self.result.same_as(&other.result)
    }

    pub(crate) fn into_parts(self) -> (Expression, Expression) {
        (self.condition, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_rule_creation() {
        let rule = Rule::new(
            Expression::bool_param("vip"),
            Expression::literal("gold"),
        )
        .unwrap();
        assert_eq!(rule.result_type(), ValueType::String);
        assert_eq!(rule.condition(), &Expression::bool_param("vip"));
    }

    #[test]
    fn test_non_bool_condition_rejected() {
        let err = Rule::new(Expression::literal(1i64), Expression::literal("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    }
}
