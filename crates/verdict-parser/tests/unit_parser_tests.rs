//! Unit tests for the s-expression parser
//!
//! Covers the ruleset form, construction checks surfaced with positions,
//! and printer/parser agreement.

use verdict_core::ast::{Expression, Operator, Rule};
use verdict_core::{ErrorKind, Ruleset, ValueType};
use verdict_parser::{parse_expression, parse_ruleset, print_expression, print_ruleset};

// =============================================================================
// Ruleset Forms
// =============================================================================

#[test]
fn test_product_ruleset() {
    let ruleset = parse_ruleset(
        r#"
        ; matches a single product
        (ruleset "string"
          (rule (eq (param "product-id" "string") (value "string" "fr-paris"))
                (value "string" "matched")))
        "#,
    )
    .unwrap();

    let expected = Ruleset::new(
        ValueType::String,
        vec![Rule::new(
            Expression::eq(vec![
                Expression::string_param("product-id"),
                Expression::literal("fr-paris"),
            ])
            .unwrap(),
            Expression::literal("matched"),
        )
        .unwrap()],
    )
    .unwrap();
    assert_eq!(ruleset, expected);
}

#[test]
fn test_tier_ruleset() {
    let ruleset = parse_ruleset(
        r#"
        (ruleset bool
          (rule (and (eq (param "tier" "string") (value "string" "gold"))
                     (gte (param "age" "int64") (value "int64" "21")))
                (value "bool" "true"))
          (rule (value "bool" "true") (value "bool" "false")))
        "#,
    )
    .unwrap();
    assert_eq!(ruleset.len(), 2);
    let signature = ruleset.signature();
    assert_eq!(signature.param("tier"), Some(ValueType::String));
    assert_eq!(signature.param("age"), Some(ValueType::Int64));
}

#[test]
fn test_result_type_mismatch() {
    let err = parse_ruleset(r#"(ruleset int64 (rule #t (value "string" "oops")))"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
}

#[test]
fn test_inconsistent_param_types() {
    let err = parse_ruleset(
        r#"(ruleset bool
             (rule (gt (param "x" "int64") 1) #t)
             (rule (eq (param "x" "string") "a") #f))"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    assert_eq!(err.position().line, 1);
    assert_eq!(err.position().column, 1);
}

#[test]
fn test_empty_ruleset() {
    let err = parse_ruleset("(ruleset string)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
}

#[test]
fn test_non_bool_condition_position() {
    let err = parse_ruleset("(ruleset string\n  (rule 1 \"x\"))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    assert_eq!(err.position().line, 2);
    assert_eq!(err.position().column, 3);
}

// =============================================================================
// Expression Errors
// =============================================================================

#[test]
fn test_operand_type_error_is_positional() {
    let err = parse_expression("(and #t\n  (= 1 \"one\"))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    assert_eq!(err.position().line, 2);
    assert_eq!(err.position().offset, 10);
}

#[test]
fn test_unknown_operator() {
    let err = parse_expression("(xor #t #f)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
    assert_eq!(err.position().column, 2);
}

#[test]
fn test_unclosed_form() {
    let err = parse_expression("(and #t #f").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn test_bare_symbol_rejected() {
    assert_eq!(parse_expression("and").unwrap_err().kind(), ErrorKind::ParseError);
}

#[test]
fn test_unknown_type_name() {
    let err = parse_expression(r#"(param "x" "int")"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn test_lex_error_surfaces() {
    let err = parse_expression("(= #yes #t)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LexError);
}

// =============================================================================
// Printer Agreement
// =============================================================================

#[test]
fn test_operator_forms_parse_to_builders() {
    let parsed = parse_expression("(if (< (param \"n\" \"int64\") 0) (- 0 (param \"n\" \"int64\")) (param \"n\" \"int64\"))").unwrap();
    let n = || Expression::int64_param("n");
    let built = Expression::if_then_else(
        Expression::lt(n(), Expression::literal(0i64)).unwrap(),
        Expression::operation(Operator::Sub, vec![Expression::literal(0i64), n()]).unwrap(),
        n(),
    )
    .unwrap();
    assert_eq!(parsed, built);
}

#[test]
fn test_print_then_parse_expressions() {
    let sources = [
        r#"(in (param "country" "string") "fr" "de" "it")"#,
        r#"(or (not (param "blocked" "bool")) (lte (param "score" "float64") 0.75))"#,
        r#"(eq (mod (param "n" "int64") 2) 0)"#,
        r#"(gt (mult 1.5 (param "x" "float64")) (value "float64" "NaN"))"#,
        r#"(eq "tab\there" "quote\"")"#,
    ];
    for src in sources {
        let expr = parse_expression(src).unwrap();
        let printed = print_expression(&expr);
        let reparsed = parse_expression(&printed).unwrap();
        assert_eq!(print_expression(&reparsed), printed);
    }
}

#[test]
fn test_print_then_parse_ruleset() {
    let src = r#"(ruleset int64
      (rule (gt (param "qty" "int64") 100) (mult (param "price" "int64") 90))
      (rule #t (mult (param "price" "int64") 100)))"#;
    let ruleset = parse_ruleset(src).unwrap();
    let printed = print_ruleset(&ruleset);
    assert!(printed.starts_with("(ruleset int64\n  (rule (gt"));
    assert_eq!(parse_ruleset(&printed).unwrap(), ruleset);
}
