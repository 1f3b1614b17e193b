//! Comparison and membership operator execution

use crate::engine::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::{Expression, Operator};
use verdict_core::Value;

/// True iff all operands are equal; stops at the first inequality
pub(crate) fn execute_eq(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    let (first, rest) = split_first(operands, Operator::Eq)?;
    let first = scope.eval(first)?;
    for operand in rest {
        if scope.eval(operand)? != first {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// True iff the needle equals a haystack element; stops at the first match
pub(crate) fn execute_in(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    let (needle, haystack) = split_first(operands, Operator::In)?;
    let needle = scope.eval(needle)?;
    for candidate in haystack {
        if scope.eval(candidate)? == needle {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

/// Numeric ordering; any comparison involving NaN is false
pub(crate) fn execute_compare(
    scope: &Scope<'_>,
    op: Operator,
    operands: &[Expression],
) -> Result<Value> {
    let [left, right] = operands else {
        return Err(RuntimeError::TypeError(format!(
            "'{}' expects 2 operands, got {}",
            op,
            operands.len()
        )));
    };
    let left = scope.eval(left)?;
    let right = scope.eval(right)?;

    let result = match (&left, &right) {
        (Value::Int64(l), Value::Int64(r)) => compare(op, l, r),
        (Value::Float64(l), Value::Float64(r)) => compare(op, l, r),
        _ => {
            return Err(RuntimeError::TypeError(format!(
                "cannot compare {} and {} with '{}'",
                left.value_type(),
                right.value_type(),
                op
            )))
        }
    };
    Ok(Value::Bool(result))
}

fn compare<T: PartialOrd>(op: Operator, left: &T, right: &T) -> bool {
    match op {
        Operator::Gt => left > right,
        Operator::Gte => left >= right,
        Operator::Lt => left < right,
        Operator::Lte => left <= right,
        _ => false,
    }
}

fn split_first(operands: &[Expression], op: Operator) -> Result<(&Expression, &[Expression])> {
    operands.split_first().ok_or_else(|| {
        RuntimeError::TypeError(format!("'{}' called without operands", op))
    })
}
