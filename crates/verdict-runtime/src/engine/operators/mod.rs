//! Operator execution modules
//!
//! Operands are passed unevaluated so each operator decides how many of
//! them to evaluate.

mod arithmetic;
mod comparison;
mod conversion;
mod hash;
mod logical;

pub(crate) use arithmetic::execute_arithmetic;
pub(crate) use comparison::{execute_compare, execute_eq, execute_in};
pub(crate) use conversion::execute_int_to_float;
pub(crate) use hash::{execute_fnv, execute_percentile};
pub(crate) use logical::{execute_and, execute_if, execute_let, execute_not, execute_or};
