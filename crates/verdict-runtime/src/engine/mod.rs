//! Evaluation engine module
//!
//! [`Evaluator`] walks rules in declared order and returns the result of the
//! first rule whose condition holds. Any fault raised while evaluating a
//! condition or result aborts the whole evaluation.

mod operators;

#[cfg(test)]
mod tests;

use crate::error::{Result, RuntimeError};
use verdict_core::ast::{Expression, Operator, ParamRef};
use verdict_core::{Params, Ruleset, Value};

/// Outcome of a successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Result of the matched rule, typed as the ruleset's result type
    pub value: Value,
    /// Zero-based index of the matched rule
    pub matched_rule: usize,
}

/// Stateless ruleset evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a ruleset: first matching rule wins, `NoMatch` otherwise
    pub fn evaluate(&self, ruleset: &Ruleset, params: &Params) -> Result<Evaluation> {
        let scope = Scope::new(params);

        for (index, rule) in ruleset.rules().iter().enumerate() {
            let holds = scope.eval_bool(rule.condition())?;
            tracing::trace!(rule = index, holds, "rule condition evaluated");
            if holds {
                let value = scope.eval(rule.result())?;
                tracing::debug!(rule = index, value = %value, "rule matched");
                return Ok(Evaluation {
                    value,
                    matched_rule: index,
                });
            }
        }

        tracing::debug!(rules = ruleset.len(), "no rule matched");
        Err(RuntimeError::NoMatch)
    }

    /// Evaluate a single expression
    pub fn evaluate_expression(&self, expr: &Expression, params: &Params) -> Result<Value> {
        Scope::new(params).eval(expr)
    }
}

/// Per-evaluation state: the read-only parameter set plus the chain of
/// `let` bindings enclosing the node being evaluated
pub(crate) struct Scope<'s> {
    params: &'s Params,
    binding: Option<(&'s str, Value)>,
    parent: Option<&'s Scope<'s>>,
}

impl<'s> Scope<'s> {
    fn new(params: &'s Params) -> Self {
        Self {
            params,
            binding: None,
            parent: None,
        }
    }

    /// Child scope in which `name` resolves to `value`
    pub(crate) fn bind<'a>(&'a self, name: &'a str, value: Value) -> Scope<'a> {
        Scope {
            params: self.params,
            binding: Some((name, value)),
            parent: Some(self),
        }
    }

    fn lookup(&self, param: &ParamRef) -> Result<Value> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some((name, value)) = &current.binding {
                if *name == param.name {
                    return Ok(value.clone());
                }
            }
            scope = current.parent;
        }
        Ok(self
            .params
            .get_typed(&param.name, param.value_type)?
            .clone())
    }

    pub(crate) fn eval(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Param(param) => self.lookup(param),
            Expression::Operation(operation) => {
                let operands = operation.operands();
                match operation.op() {
                    Operator::And => operators::execute_and(self, operands),
                    Operator::Or => operators::execute_or(self, operands),
                    Operator::Not => operators::execute_not(self, operands),
                    Operator::Eq => operators::execute_eq(self, operands),
                    Operator::In => operators::execute_in(self, operands),
                    op @ (Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte) => {
                        operators::execute_compare(self, op, operands)
                    }
                    op @ (Operator::Add
                    | Operator::Sub
                    | Operator::Mult
                    | Operator::Div
                    | Operator::Mod) => operators::execute_arithmetic(self, op, operands),
                    Operator::If => operators::execute_if(self, operands),
                    Operator::Let => operators::execute_let(self, operands),
                    Operator::Fnv => operators::execute_fnv(self, operands),
                    Operator::Percentile => operators::execute_percentile(self, operands),
                    Operator::IntToFloat => operators::execute_int_to_float(self, operands),
                }
            }
        }
    }

    pub(crate) fn eval_bool(&self, expr: &Expression) -> Result<bool> {
        match self.eval(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::TypeError(format!(
                "expected bool, got {}",
                other.value_type()
            ))),
        }
    }
}
