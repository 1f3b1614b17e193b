//! Evaluator tests


use verdict_core::{Params, Value};
use verdict_parser::parse_expression;

use super::Evaluator;
use crate::error::Result;

/// Parse and evaluate one expression
pub(super) fn eval(src: &str, params: &Params) -> Result<Value> {
    let expr = parse_expression(src).expect("test expression should parse");
    Evaluator::new().evaluate_expression(&expr, params)
}
