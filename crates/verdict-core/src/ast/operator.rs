//! Operators for Verdict expressions
//!
//! Each operator declares its arity and the operand types it accepts.
//! [`Operator::check`] is the single type checker used by every builder,
//! the JSON decoder and the s-expression parser.

use crate::error::{CoreError, Result};
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    // Logical operators
    /// Logical AND, short-circuits on first false
    And,
    /// Logical OR, short-circuits on first true
    Or,
    /// Logical NOT
    Not,

    // Comparison operators
    /// Equality across all operands
    Eq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,

    // Membership operators
    /// Needle in haystack
    In,

    // Arithmetic operators
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mult,
    /// Division (/)
    Div,
    /// Integer remainder (%)
    Mod,

    // Control
    /// Conditional (test, then, else)
    If,
    /// Scoped binding (param, value, body)
    Let,

    // Hashing and sampling
    /// 32-bit FNV-1 hash of the operand's canonical text
    Fnv,
    /// True when the operand's hash falls in the given percentile
    Percentile,

    // Conversion
    /// int64 to float64
    #[serde(rename = "intToFloat")]
    IntToFloat,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(&self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == *k,
            Arity::AtLeast(k) => n >= *k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "exactly {}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

impl Operator {
    /// All operator kinds
    pub const ALL: [Operator; 19] = [
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::Eq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::Add,
        Operator::Sub,
        Operator::Mult,
        Operator::Div,
        Operator::Mod,
        Operator::If,
        Operator::Let,
        Operator::Fnv,
        Operator::Percentile,
        Operator::IntToFloat,
    ];

    /// Kind name used on the wire and in s-expressions
    pub fn name(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mult => "mult",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::If => "if",
            Operator::Let => "let",
            Operator::Fnv => "fnv",
            Operator::Percentile => "percentile",
            Operator::IntToFloat => "intToFloat",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Not | Operator::Fnv | Operator::IntToFloat => Arity::Exactly(1),
            Operator::Gt
            | Operator::Gte
            | Operator::Lt
            | Operator::Lte
            | Operator::Mod
            | Operator::Percentile => Arity::Exactly(2),
            Operator::If | Operator::Let => Arity::Exactly(3),
            Operator::And
            | Operator::Or
            | Operator::Eq
            | Operator::In
            | Operator::Add
            | Operator::Sub
            | Operator::Mult
            | Operator::Div => Arity::AtLeast(2),
        }
    }

    /// Returns true if this is a logical operator
    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }

    /// Returns true if this is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }

    /// Returns true if this is an arithmetic operator
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mult | Operator::Div | Operator::Mod
        )
    }

    /// Validate operand types and return the result type.
    pub fn check(&self, operands: &[ValueType]) -> Result<ValueType> {
        let arity = self.arity();
        if !arity.accepts(operands.len()) {
            return Err(CoreError::signature(format!(
                "'{}' expects {} operands, got {}",
                self,
                arity,
                operands.len()
            )));
        }

        match self {
            Operator::And | Operator::Or | Operator::Not => {
                self.expect_all(operands, ValueType::Bool)?;
                Ok(ValueType::Bool)
            }
            Operator::Eq | Operator::In => {
                self.expect_uniform(operands)?;
                Ok(ValueType::Bool)
            }
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                self.expect_numeric(operands)?;
                Ok(ValueType::Bool)
            }
            Operator::Add | Operator::Sub | Operator::Mult | Operator::Div => {
                self.expect_numeric(operands)
            }
            Operator::Mod => {
                self.expect_all(operands, ValueType::Int64)?;
                Ok(ValueType::Int64)
            }
            Operator::If => {
                if operands[0] != ValueType::Bool {
                    return Err(self.operand_mismatch(0, ValueType::Bool, operands[0]));
                }
                if operands[1] != operands[2] {
                    return Err(self.operand_mismatch(2, operands[1], operands[2]));
                }
                Ok(operands[1])
            }
            // The binder's shape is checked by Expression::operation
            Operator::Let => {
                if operands[0] != operands[1] {
                    return Err(self.operand_mismatch(1, operands[0], operands[1]));
                }
                Ok(operands[2])
            }
            Operator::Fnv => Ok(ValueType::Int64),
            Operator::Percentile => {
                if operands[1] != ValueType::Int64 {
                    return Err(self.operand_mismatch(1, ValueType::Int64, operands[1]));
                }
                Ok(ValueType::Bool)
            }
            Operator::IntToFloat => {
                self.expect_all(operands, ValueType::Int64)?;
                Ok(ValueType::Float64)
            }
        }
    }

    fn expect_all(&self, operands: &[ValueType], expected: ValueType) -> Result<()> {
        match operands.iter().position(|ty| *ty != expected) {
            Some(i) => Err(self.operand_mismatch(i, expected, operands[i])),
            None => Ok(()),
        }
    }

    fn expect_uniform(&self, operands: &[ValueType]) -> Result<ValueType> {
        let first = operands[0];
        self.expect_all(operands, first)?;
        Ok(first)
    }

    fn expect_numeric(&self, operands: &[ValueType]) -> Result<ValueType> {
        let first = operands[0];
        if !first.is_numeric() {
            return Err(CoreError::signature(format!(
                "'{}' expects int64 or float64 operands, got {} at position 0",
                self, first
            )));
        }
        self.expect_all(operands, first)?;
        Ok(first)
    }

    fn operand_mismatch(&self, position: usize, expected: ValueType, actual: ValueType) -> CoreError {
        CoreError::signature(format!(
            "'{}' expects {} at position {}, got {}",
            self, expected, position, actual
        ))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| CoreError::Decode(format!("unknown operator '{}'", s)))
    }
}
