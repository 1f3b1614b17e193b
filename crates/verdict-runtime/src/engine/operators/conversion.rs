//! Type conversion operator execution

use crate::engine::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::Expression;
use verdict_core::Value;

/// Nearest float64; magnitudes above 2^53 may round
pub(crate) fn execute_int_to_float(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    let [operand] = operands else {
        return Err(RuntimeError::TypeError(format!(
            "'intToFloat' expects 1 operand, got {}",
            operands.len()
        )));
    };
    match scope.eval(operand)? {
        Value::Int64(n) => Ok(Value::Float64(n as f64)),
        other => Err(RuntimeError::TypeError(format!(
            "'intToFloat' expects int64, got {}",
            other.value_type()
        ))),
    }
}
