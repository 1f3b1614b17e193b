//! Ruleset signatures
//!
//! A signature is the set of parameter types a ruleset reads plus the type
//! it returns. Two rulesets agree when their result types match and every
//! parameter they share has the same type.

use crate::error::{CoreError, Result};
use crate::types::ValueType;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    result_type: ValueType,
    params: BTreeMap<String, ValueType>,
}

impl Signature {
    pub fn new(result_type: ValueType) -> Self {
        Self {
            result_type,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.insert_param(name, value_type);
        self
    }

    pub fn insert_param(&mut self, name: impl Into<String>, value_type: ValueType) {
        self.params.insert(name.into(), value_type);
    }

    pub fn result_type(&self) -> ValueType {
        self.result_type
    }

    pub fn param(&self, name: &str) -> Option<ValueType> {
        self.params.get(name).copied()
    }

    pub fn params(&self) -> &BTreeMap<String, ValueType> {
        &self.params
    }

    /// Fail with the first disagreement between two signatures
    pub fn check(&self, other: &Signature) -> Result<()> {
        if self.result_type != other.result_type {
            return Err(CoreError::signature(format!(
                "result type {} does not match {}",
                other.result_type, self.result_type
            )));
        }
        for (name, ty) in &self.params {
            if let Some(other_ty) = other.params.get(name) {
                if other_ty != ty {
                    return Err(CoreError::signature(format!(
                        "parameter '{}' is {} but was {}",
                        name, other_ty, ty
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn agrees_with(&self, other: &Signature) -> bool {
        self.check(other).is_ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (name, ty)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, ty)?;
        }
        write!(f, ") -> {}", self.result_type)
    }
}
