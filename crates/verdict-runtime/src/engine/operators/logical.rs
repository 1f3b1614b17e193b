//! Logical, conditional and binding operator execution

use crate::engine::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::Expression;
use verdict_core::Value;

/// Stops at the first false operand
pub(crate) fn execute_and(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    for operand in operands {
        if !scope.eval_bool(operand)? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// Stops at the first true operand
pub(crate) fn execute_or(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    for operand in operands {
        if scope.eval_bool(operand)? {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

pub(crate) fn execute_not(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    match operands {
        [operand] => Ok(Value::Bool(!scope.eval_bool(operand)?)),
        _ => Err(RuntimeError::TypeError(format!(
            "'not' expects 1 operand, got {}",
            operands.len()
        ))),
    }
}

/// Evaluates the test, then only the selected branch
pub(crate) fn execute_if(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    match operands {
        [test, then, otherwise] => {
            if scope.eval_bool(test)? {
                scope.eval(then)
            } else {
                scope.eval(otherwise)
            }
        }
        _ => Err(RuntimeError::TypeError(format!(
            "'if' expects 3 operands, got {}",
            operands.len()
        ))),
    }
}

/// Evaluates the value in the enclosing scope, then the body with the
/// binder resolving to that value
pub(crate) fn execute_let(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    match operands {
        [Expression::Param(binder), value, body] => {
            let value = scope.eval(value)?;
            if value.value_type() != binder.value_type {
                return Err(RuntimeError::TypeError(format!(
                    "cannot bind {} to '{}' of type {}",
                    value.value_type(),
                    binder.name,
                    binder.value_type
                )));
            }
            scope.bind(&binder.name, value).eval(body)
        }
        _ => Err(RuntimeError::TypeError(
            "'let' expects a parameter, a value and a body".to_string(),
        )),
    }
}
