//! Ruleset AST definitions
//!
//! A ruleset is an ordered list of rules sharing one result type. The first
//! rule whose condition holds decides the result.

use crate::ast::{ParamRef, Rule};
use crate::error::{CoreError, Result};
use crate::signature::Signature;
use crate::types::ValueType;
use crate::wire::{self, RawRuleset};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validated, ordered collection of rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleset", into = "RawRuleset")]
pub struct Ruleset {
    result_type: ValueType,
    rules: Vec<Rule>,
}

impl Ruleset {
    /// Create a ruleset, checking that:
    /// - there is at least one rule
    /// - every rule returns `result_type`
    /// - a parameter name always carries the same type
    /// - a name bound by `let` is never also supplied by the caller
    pub fn new(result_type: ValueType, rules: Vec<Rule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(CoreError::signature("ruleset must contain at least one rule"));
        }

        for (index, rule) in rules.iter().enumerate() {
            let actual = rule.result_type();
            if actual != result_type {
                return Err(CoreError::signature(format!(
                    "rule {} returns {}, ruleset declares {}",
                    index, actual, result_type
                )));
            }
        }

        let ruleset = Self { result_type, rules };
        ruleset.check_param_consistency()?;
        ruleset.check_bindings()?;
        log::trace!(
            "built ruleset of {} rules returning {}",
            ruleset.rules.len(),
            result_type
        );
        Ok(ruleset)
    }

    pub fn result_type(&self) -> ValueType {
        self.result_type
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a constructed ruleset
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Structural identity. Unlike `==`, a ruleset holding a NaN literal is
    /// the same as its decoded copy.
    pub fn same_as(&self, other: &Ruleset) -> bool {
        self.result_type == other.result_type
            && self.rules.len() == other.rules.len()
            && self.rules.iter().zip(&other.rules).all(|(a, b)| a.same_as(b))
    }

    /// Distinct parameter references, in first-seen order
    pub fn params(&self) -> Vec<&ParamRef> {
        let mut seen = HashSet::new();
        let mut params = Vec::new();
        self.visit_params(&mut |param| {
            if seen.insert(param.name.as_str()) {
                params.push(param);
            }
        });
        params
    }

    /// Parameter types and result type implied by this ruleset
    pub fn signature(&self) -> Signature {
        let mut signature = Signature::new(self.result_type);
        for param in self.params() {
            signature.insert_param(param.name.clone(), param.value_type);
        }
        signature
    }

    /// Serialize to the JSON document stored by stores
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and validate a JSON document.
    ///
    /// Malformed documents fail with a decode error; well-formed documents
    /// that describe an ill-typed tree fail with a signature mismatch.
    pub fn from_json(data: &str) -> Result<Self> {
        wire::ruleset_from_json(data)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        wire::ruleset_from_yaml(data)
    }

    fn visit_params<'a>(&'a self, visit: &mut impl FnMut(&'a ParamRef)) {
        for rule in &self.rules {
            rule.condition().visit_params(visit);
            rule.result().visit_params(visit);
        }
    }

    fn check_param_consistency(&self) -> Result<()> {
        let mut types: HashMap<&str, ValueType> = HashMap::new();
        let mut conflict = None;
        self.visit_params(&mut |param| {
            if conflict.is_some() {
                return;
            }
            match types.get(param.name.as_str()) {
                Some(&existing) if existing != param.value_type => {
                    conflict = Some(CoreError::signature(format!(
                        "parameter '{}' used as both {} and {}",
                        param.name, existing, param.value_type
                    )));
                }
                Some(_) => {}
                None => {
                    types.insert(param.name.as_str(), param.value_type);
                }
            }
        });
        match conflict {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_bindings(&self) -> Result<()> {
        let free: HashSet<&str> = self.params().into_iter().map(|p| p.name.as_str()).collect();
        let mut clash = None;
        for rule in &self.rules {
            for expr in [rule.condition(), rule.result()] {
                expr.visit_bindings(&mut |binder| {
                    if clash.is_none() && free.contains(binder.name.as_str()) {
                        clash = Some(binder.name.clone());
                    }
                });
            }
        }
        match clash {
            Some(name) => Err(CoreError::signature(format!(
                "parameter '{}' is bound by 'let' and also supplied by the caller",
                name
            ))),
            None => Ok(()),
        }
    }

    pub(crate) fn into_parts(self) -> (ValueType, Vec<Rule>) {
        (self.result_type, self.rules)
    }
}
