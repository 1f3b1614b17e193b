//! Persisted document shape
//!
//! The AST types serialize through these raw structs. Decoding builds the
//! AST through its checked constructors, so a decoded tree is as valid as
//! one assembled in code.

use crate::ast::{Expression, Rule, Ruleset};
use crate::error::{CoreError, Result};
use crate::types::{Value, ValueType};
use serde::{Deserialize, Serialize};

const KIND_VALUE: &str = "value";
const KIND_PARAM: &str = "param";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawExpr {
    kind: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    operands: Vec<RawExpr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawRule {
    expr: RawExpr,
    result: RawExpr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawRuleset {
    #[serde(rename = "type")]
    result_type: ValueType,
    rules: Vec<RawRule>,
}

impl RawExpr {
    fn required<'a>(&self, field: &'a str, value: Option<&'a str>) -> Result<&'a str> {
        value.ok_or_else(|| {
            CoreError::Decode(format!("'{}' node is missing field '{}'", self.kind, field))
        })
    }

    fn required_type(&self) -> Result<ValueType> {
        self.value_type.ok_or_else(|| {
            CoreError::Decode(format!("'{}' node is missing field 'type'", self.kind))
        })
    }
}

impl From<Expression> for RawExpr {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Literal(value) => RawExpr {
                kind: KIND_VALUE.to_string(),
                value_type: Some(value.value_type()),
                data: Some(value.to_canonical_string()),
                name: None,
                operands: Vec::new(),
            },
            Expression::Param(param) => RawExpr {
                kind: KIND_PARAM.to_string(),
                value_type: Some(param.value_type),
                data: None,
                name: Some(param.name),
                operands: Vec::new(),
            },
            Expression::Operation(operation) => RawExpr {
                kind: operation.op().name().to_string(),
                value_type: None,
                data: None,
                name: None,
                operands: operation
                    .operands()
                    .iter()
                    .cloned()
                    .map(RawExpr::from)
                    .collect(),
            },
        }
    }
}

impl TryFrom<RawExpr> for Expression {
    type Error = CoreError;

    fn try_from(raw: RawExpr) -> Result<Self> {
        match raw.kind.as_str() {
            KIND_VALUE => {
                let value_type = raw.required_type()?;
                let data = raw.required("data", raw.data.as_deref())?;
                Value::parse(value_type, data)
                    .map(Expression::Literal)
                    .map_err(|e| CoreError::Decode(e.to_string()))
            }
            KIND_PARAM => {
                let value_type = raw.required_type()?;
                let name = raw.required("name", raw.name.as_deref())?;
                Ok(Expression::param(name, value_type))
            }
            kind => {
                let op = kind.parse()?;
                let operands = raw
                    .operands
                    .into_iter()
                    .map(Expression::try_from)
                    .collect::<Result<Vec<_>>>()?;
                Expression::operation(op, operands)
            }
        }
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let (condition, result) = rule.into_parts();
        RawRule {
            expr: condition.into(),
            result: result.into(),
        }
    }
}

impl TryFrom<RawRule> for Rule {
    type Error = CoreError;

    fn try_from(raw: RawRule) -> Result<Self> {
        Rule::new(Expression::try_from(raw.expr)?, Expression::try_from(raw.result)?)
    }
}

impl From<Ruleset> for RawRuleset {
    fn from(ruleset: Ruleset) -> Self {
        let (result_type, rules) = ruleset.into_parts();
        RawRuleset {
            result_type,
            rules: rules.into_iter().map(RawRule::from).collect(),
        }
    }
}

impl TryFrom<RawRuleset> for Ruleset {
    type Error = CoreError;

    fn try_from(raw: RawRuleset) -> Result<Self> {
        let rules = raw
            .rules
            .into_iter()
            .map(Rule::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ruleset::new(raw.result_type, rules)
    }
}

/// Decode a ruleset document from JSON, keeping the error kind of
/// construction failures.
pub(crate) fn ruleset_from_json(data: &str) -> Result<Ruleset> {
    let raw: RawRuleset = serde_json::from_str(data)?;
    Ruleset::try_from(raw)
}

pub(crate) fn ruleset_from_yaml(data: &str) -> Result<Ruleset> {
    let raw: RawRuleset = serde_yaml::from_str(data)?;
    Ruleset::try_from(raw)
}
