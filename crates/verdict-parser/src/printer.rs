//! AST to s-expression printer
//!
//! Output uses operator names (never aliases) and parses back to an equal
//! AST.

use std::fmt::Write;
use verdict_core::ast::{Expression, Ruleset};
use verdict_core::Value;

/// Render an expression on a single line
pub fn print_expression(expr: &Expression) -> String {
    let mut out = String::new();
    write_expression(&mut out, expr);
    out
}

/// Render a ruleset with one rule per line
pub fn print_ruleset(ruleset: &Ruleset) -> String {
    let mut out = format!("(ruleset {}", ruleset.result_type());
    for rule in ruleset.rules() {
        out.push_str("\n  (rule ");
        write_expression(&mut out, rule.condition());
        out.push(' ');
        write_expression(&mut out, rule.result());
        out.push(')');
    }
    out.push(')');
    out
}

fn write_expression(out: &mut String, expr: &Expression) {
    match expr {
        Expression::Literal(value) => write_value(out, value),
        Expression::Param(param) => {
            out.push_str("(param ");
            write_string(out, &param.name);
            let _ = write!(out, " \"{}\")", param.value_type);
        }
        Expression::Operation(operation) => {
            out.push('(');
            out.push_str(operation.op().name());
            for operand in operation.operands() {
                out.push(' ');
                write_expression(out, operand);
            }
            out.push(')');
        }
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_string(out, s),
        Value::Bool(b) => out.push_str(if *b { "#t" } else { "#f" }),
        Value::Int64(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Float64(n) if n.is_finite() => {
            let text = n.to_string();
            out.push_str(&text);
            if !text.contains('.') {
                out.push_str(".0");
            }
        }
        Value::Float64(_) => {
            let _ = write!(
                out,
                "(value \"float64\" \"{}\")",
                value.to_canonical_string()
            );
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_expression;

    #[test]
    fn test_print_operation() {
        let expr = parse_expression(r#"(= (param "id" "string") "a\"b")"#).unwrap();
        assert_eq!(print_expression(&expr), r#"(eq (param "id" "string") "a\"b")"#);
    }

    #[test]
    fn test_print_floats() {
        assert_eq!(print_expression(&Expression::literal(2.0)), "2.0");
        assert_eq!(print_expression(&Expression::literal(-0.125)), "-0.125");
        assert_eq!(
            print_expression(&Expression::literal(f64::INFINITY)),
            r#"(value "float64" "inf")"#
        );
    }

    #[test]
    fn test_print_bools_and_ints() {
        assert_eq!(print_expression(&Expression::literal(true)), "#t");
        assert_eq!(print_expression(&Expression::literal(-7i64)), "-7");
    }

    #[test]
    fn test_print_let_and_conversion() {
        let src = r#"(let (param "n" "float64") (intToFloat (param "count" "int64")) (percentile (fnv (param "n" "float64")) 10))"#;
        let expr = parse_expression(src).unwrap();
        let printed = print_expression(&expr);
        assert_eq!(printed, src);
        assert_eq!(parse_expression(&printed).unwrap(), expr);
    }
}
