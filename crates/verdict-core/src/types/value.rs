//! Runtime value types for Verdict expressions
//!
//! The `Value` enum is the closed set of scalar values a ruleset can read,
//! compare and produce. `ValueType` is the matching type tag.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type tag of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Bool,
    Int64,
    Float64,
}

impl ValueType {
    /// Wire name of the type tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int64 => "int64",
            ValueType::Float64 => "float64",
        }
    }

    /// Returns true for int64 and float64
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int64 | ValueType::Float64)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(ValueType::String),
            "bool" => Ok(ValueType::Bool),
            "int64" => Ok(ValueType::Int64),
            "float64" => Ok(ValueType::Float64),
            other => Err(CoreError::InvalidValue(format!("unknown type '{}'", other))),
        }
    }
}

/// Runtime value
///
/// Equality is structural; floats compare with IEEE semantics, so
/// `NaN != NaN` and `0.0 == -0.0`. Use [`Value::same_as`] for identity
/// (e.g. comparing a ruleset with its decoded copy).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string
    String(String),
    /// Boolean value
    Bool(bool),
    /// Signed 64-bit integer
    Int64(i64),
    /// IEEE-754 double
    Float64(f64),
}

impl Value {
    /// Type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Int64(_) => ValueType::Int64,
            Value::Float64(_) => ValueType::Float64,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Float64(n) => Some(*n),
            _ => None,
        }
    }

    /// Identity rather than IEEE equality: any NaN is the same as any NaN,
    /// and `0.0` is not the same as `-0.0`
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float64(a), Value::Float64(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            _ => self == other,
        }
    }

    /// Canonical textual form used by the persisted encoding.
    ///
    /// Numbers are written as strings so int64 values keep full precision.
    /// Floats use the shortest representation that parses back to the same
    /// bits, and `NaN`/`inf`/`-inf` for non-finite values.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Float64(n) => n.to_string(),
        }
    }

    /// Parse a canonical textual form into a value of the given type
    pub fn parse(value_type: ValueType, data: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidValue(format!("'{}' is not a valid {}", data, value_type));
        match value_type {
            ValueType::String => Ok(Value::String(data.to_string())),
            ValueType::Bool => match data {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
            ValueType::Int64 => data.parse::<i64>().map(Value::Int64).map_err(|_| invalid()),
            ValueType::Float64 => data
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => f.write_str(&other.to_canonical_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int64(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float64(n)
    }
}
