//! Expression AST nodes
//!
//! Operator nodes can only be built through [`Expression::operation`] (or the
//! helper constructors that call it), which type-checks the operands. A tree
//! that exists is therefore well-typed, and every node knows its result type
//! without being evaluated.

use super::operator::Operator;
use crate::error::{CoreError, Result};
use crate::types::{Value, ValueType};
use crate::wire::RawExpr;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpr", into = "RawExpr")]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Reference to a named parameter with a declared type
    Param(ParamRef),

    /// Type-checked operator application
    Operation(Operation),
}

/// Parameter reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamRef {
    pub name: String,
    pub value_type: ValueType,
}

impl ParamRef {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Operator application.
///
/// Fields are private so an `Operation` cannot exist without having passed
/// [`Operator::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    op: Operator,
    operands: Vec<Expression>,
    result_type: ValueType,
}

impl Operation {
    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }

    pub fn result_type(&self) -> ValueType {
        self.result_type
    }
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create a parameter reference
    pub fn param(name: impl Into<String>, value_type: ValueType) -> Self {
        Expression::Param(ParamRef::new(name, value_type))
    }

    pub fn string_param(name: impl Into<String>) -> Self {
        Self::param(name, ValueType::String)
    }

    pub fn bool_param(name: impl Into<String>) -> Self {
        Self::param(name, ValueType::Bool)
    }

    pub fn int64_param(name: impl Into<String>) -> Self {
        Self::param(name, ValueType::Int64)
    }

    pub fn float64_param(name: impl Into<String>) -> Self {
        Self::param(name, ValueType::Float64)
    }

    /// Create an operator node, checking arity and operand types
    pub fn operation(op: Operator, operands: Vec<Expression>) -> Result<Self> {
        let types: Vec<ValueType> = operands.iter().map(Expression::value_type).collect();
        let result_type = op.check(&types)?;
        if op == Operator::Let {
            check_binding(&operands)?;
        }
        Ok(Expression::Operation(Operation {
            op,
            operands,
            result_type,
        }))
    }

    pub fn and(operands: Vec<Expression>) -> Result<Self> {
        Self::operation(Operator::And, operands)
    }

    pub fn or(operands: Vec<Expression>) -> Result<Self> {
        Self::operation(Operator::Or, operands)
    }

    pub fn not(operand: Expression) -> Result<Self> {
        Self::operation(Operator::Not, vec![operand])
    }

    pub fn eq(operands: Vec<Expression>) -> Result<Self> {
        Self::operation(Operator::Eq, operands)
    }

    /// `needle in haystack`
    pub fn is_in(needle: Expression, haystack: Vec<Expression>) -> Result<Self> {
        let mut operands = Vec::with_capacity(haystack.len() + 1);
        operands.push(needle);
        operands.extend(haystack);
        Self::operation(Operator::In, operands)
    }

    pub fn gt(left: Expression, right: Expression) -> Result<Self> {
        Self::operation(Operator::Gt, vec![left, right])
    }

    pub fn gte(left: Expression, right: Expression) -> Result<Self> {
        Self::operation(Operator::Gte, vec![left, right])
    }

    pub fn lt(left: Expression, right: Expression) -> Result<Self> {
        Self::operation(Operator::Lt, vec![left, right])
    }

    pub fn lte(left: Expression, right: Expression) -> Result<Self> {
        Self::operation(Operator::Lte, vec![left, right])
    }

    pub fn if_then_else(test: Expression, then: Expression, otherwise: Expression) -> Result<Self> {
        Self::operation(Operator::If, vec![test, then, otherwise])
    }

    /// Evaluate `body` with `param` bound to `value`
    pub fn let_in(param: ParamRef, value: Expression, body: Expression) -> Result<Self> {
        Self::operation(Operator::Let, vec![Expression::Param(param), value, body])
    }

    pub fn fnv(operand: Expression) -> Result<Self> {
        Self::operation(Operator::Fnv, vec![operand])
    }

    pub fn percentile(operand: Expression, percentile: Expression) -> Result<Self> {
        Self::operation(Operator::Percentile, vec![operand, percentile])
    }

    pub fn int_to_float(operand: Expression) -> Result<Self> {
        Self::operation(Operator::IntToFloat, vec![operand])
    }

    /// Result type of this node
    pub fn value_type(&self) -> ValueType {
        match self {
            Expression::Literal(value) => value.value_type(),
            Expression::Param(param) => param.value_type,
            Expression::Operation(operation) => operation.result_type,
        }
    }

    /// Structural identity, comparing literals with [`Value::same_as`]
    pub fn same_as(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Literal(a), Expression::Literal(b)) => a.same_as(b),
            (Expression::Param(a), Expression::Param(b)) => a == b,
            (Expression::Operation(a), Expression::Operation(b)) => {
                a.op == b.op
                    && a.operands.len() == b.operands.len()
                    && a.operands
                        .iter()
                        .zip(&b.operands)
                        .all(|(x, y)| x.same_as(y))
            }
            _ => false,
        }
    }

    /// Visit every parameter reference that must be supplied by the caller,
    /// depth-first, left to right. Names bound by an enclosing `let` are
    /// skipped.
    pub fn visit_params<'a>(&'a self, visit: &mut impl FnMut(&'a ParamRef)) {
        self.visit_free(&[], visit);
    }

    /// Visit the binder of every `let` node, outermost first
    pub fn visit_bindings<'a>(&'a self, visit: &mut impl FnMut(&'a ParamRef)) {
        if let Expression::Operation(operation) = self {
            if let Some(binder) = operation.binder() {
                visit(binder);
            }
            for operand in &operation.operands {
                operand.visit_bindings(visit);
            }
        }
    }

    fn visit_free<'a>(&'a self, bound: &[&str], visit: &mut impl FnMut(&'a ParamRef)) {
        match self {
            Expression::Literal(_) => {}
            Expression::Param(param) => {
                if !bound.contains(&param.name.as_str()) {
                    visit(param);
                }
            }
            Expression::Operation(operation) => match (operation.binder(), &operation.operands[..]) {
                (Some(binder), [_, value, body]) => {
                    value.visit_free(bound, visit);
                    let mut inner: Vec<&str> = bound.to_vec();
                    inner.push(binder.name.as_str());
                    body.visit_free(&inner, visit);
                }
                _ => {
                    for operand in &operation.operands {
                        operand.visit_free(bound, visit);
                    }
                }
            },
        }
    }
}

impl Operation {
    /// The parameter a `let` node binds
    pub fn binder(&self) -> Option<&ParamRef> {
        match (self.op, self.operands.first()) {
            (Operator::Let, Some(Expression::Param(param))) => Some(param),
            _ => None,
        }
    }
}

/// A `let` binds a parameter reference, and its body must use the bound
/// name with the bound type. Rebinding a name inside its own body is
/// rejected.
fn check_binding(operands: &[Expression]) -> Result<()> {
    let binder = match operands.first() {
        Some(Expression::Param(param)) => param,
        _ => {
            return Err(CoreError::signature(
                "'let' expects a parameter at position 0",
            ))
        }
    };
    let Some(body) = operands.get(2) else {
        return Ok(());
    };

    let mut error = None;
    body.visit_bindings(&mut |inner| {
        if error.is_none() && inner.name == binder.name {
            error = Some(CoreError::signature(format!(
                "'let' rebinds parameter '{}'",
                binder.name
            )));
        }
    });
    body.visit_params(&mut |param| {
        if error.is_none() && param.name == binder.name && param.value_type != binder.value_type {
            error = Some(CoreError::signature(format!(
                "parameter '{}' is bound as {} but used as {}",
                binder.name, binder.value_type, param.value_type
            )));
        }
    });
    match error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
