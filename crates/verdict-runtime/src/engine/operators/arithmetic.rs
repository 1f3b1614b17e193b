//! Arithmetic operator execution
//!
//! Integer arithmetic is checked: overflow and division by zero are errors.
//! Float arithmetic follows IEEE-754.

use crate::engine::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::{Expression, Operator};
use verdict_core::Value;

/// Left fold of the operands with `op`
pub(crate) fn execute_arithmetic(
    scope: &Scope<'_>,
    op: Operator,
    operands: &[Expression],
) -> Result<Value> {
    let (first, rest) = operands.split_first().ok_or_else(|| {
        RuntimeError::TypeError(format!("'{}' called without operands", op))
    })?;

    let mut acc = scope.eval(first)?;
    for operand in rest {
        let rhs = scope.eval(operand)?;
        acc = match (acc, rhs) {
            (Value::Int64(l), Value::Int64(r)) => Value::Int64(apply_int(op, l, r)?),
            (Value::Float64(l), Value::Float64(r)) => Value::Float64(apply_float(op, l, r)?),
            (l, r) => {
                return Err(RuntimeError::TypeError(format!(
                    "cannot apply '{}' to {} and {}",
                    op,
                    l.value_type(),
                    r.value_type()
                )))
            }
        };
    }
    Ok(acc)
}

fn apply_int(op: Operator, l: i64, r: i64) -> Result<i64> {
    let name = op.name();
    match op {
        Operator::Add => l.checked_add(r).ok_or(RuntimeError::Overflow(name)),
        Operator::Sub => l.checked_sub(r).ok_or(RuntimeError::Overflow(name)),
        Operator::Mult => l.checked_mul(r).ok_or(RuntimeError::Overflow(name)),
        Operator::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero(name));
            }
            l.checked_div(r).ok_or(RuntimeError::Overflow(name))
        }
        Operator::Mod => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero(name));
            }
            // i64::MIN % -1 is 0; only checked_rem reports it as overflow
            Ok(l.wrapping_rem(r))
        }
        _ => Err(RuntimeError::TypeError(format!(
            "'{}' is not an arithmetic operator",
            op
        ))),
    }
}

fn apply_float(op: Operator, l: f64, r: f64) -> Result<f64> {
    match op {
        Operator::Add => Ok(l + r),
        Operator::Sub => Ok(l - r),
        Operator::Mult => Ok(l * r),
        Operator::Div => Ok(l / r),
        _ => Err(RuntimeError::TypeError(format!(
            "'{}' is not defined for float64",
            op
        ))),
    }
}
