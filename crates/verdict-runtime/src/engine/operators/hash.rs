//! Hashing and sampling operator execution
//!
//! Hashes are 32-bit FNV-1 over the canonical text of a value.

use crate::engine::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::Expression;
use verdict_core::Value;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

pub(crate) fn execute_fnv(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    match operands {
        [operand] => Ok(Value::Int64(hash_value(&scope.eval(operand)?))),
        _ => Err(RuntimeError::TypeError(format!(
            "'fnv' expects 1 operand, got {}",
            operands.len()
        ))),
    }
}

/// True when `fnv(value) % 100 <= percentile`
pub(crate) fn execute_percentile(scope: &Scope<'_>, operands: &[Expression]) -> Result<Value> {
    let [operand, percentile] = operands else {
        return Err(RuntimeError::TypeError(format!(
            "'percentile' expects 2 operands, got {}",
            operands.len()
        )));
    };
    let bucket = hash_value(&scope.eval(operand)?) % 100;
    match scope.eval(percentile)? {
        Value::Int64(p) => Ok(Value::Bool(bucket <= p)),
        other => Err(RuntimeError::TypeError(format!(
            "'percentile' expects an int64 percentile, got {}",
            other.value_type()
        ))),
    }
}

fn hash_value(value: &Value) -> i64 {
    i64::from(fnv1_32(value.to_canonical_string().as_bytes()))
}

fn fnv1_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        hash.wrapping_mul(FNV_PRIME) ^ u32::from(*byte)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1_32_vectors() {
        assert_eq!(fnv1_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1_32(b"1234"), 2_179_869_525);
        assert_eq!(fnv1_32(b"travelling in style"), 536_463_009);
    }
}
