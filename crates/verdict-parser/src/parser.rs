//! Recursive descent parser for s-expressions
//!
//! Grammar:
//!
//! ```text
//! ruleset := "(" "ruleset" type rule+ ")"
//! rule    := "(" "rule" expr expr ")"
//! expr    := STRING | NUMBER | BOOL
//!          | "(" "param" STRING type ")"
//!          | "(" "value" type STRING ")"
//!          | "(" operator expr* ")"
//! type    := "string" | "bool" | "int64" | "float64"   (quoted or bare)
//! ```

use crate::error::{ParseError, Position, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::symbols;
use verdict_core::{Expression, Rule, Ruleset, Value, ValueType};

/// Nesting limit, keeps hostile input from exhausting the stack
const MAX_DEPTH: usize = 256;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse exactly one expression from the input
    pub fn parse(src: &str) -> Result<Expression> {
        let mut cursor = Cursor::new(src)?;
        let expr = cursor.parse_expr(0)?;
        cursor.expect_eof()?;
        log::debug!("parsed expression of type {}", expr.value_type());
        Ok(expr)
    }
}

/// Ruleset parser
pub struct RulesetParser;

impl RulesetParser {
    /// Parse exactly one `(ruleset ...)` form from the input
    pub fn parse(src: &str) -> Result<Ruleset> {
        let mut cursor = Cursor::new(src)?;
        let ruleset = cursor.parse_ruleset()?;
        cursor.expect_eof()?;
        log::debug!(
            "parsed ruleset of {} rules returning {}",
            ruleset.len(),
            ruleset.result_type()
        );
        Ok(ruleset)
    }
}

struct Cursor {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Cursor {
    fn new(src: &str) -> Result<Self> {
        Ok(Self {
            tokens: Lexer::tokenize(src)?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Spanned {
        // tokenize always ends with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Spanned {
        let spanned = self.peek().clone();
        if spanned.token != Token::Eof {
            self.pos += 1;
        }
        spanned
    }

    fn expect_eof(&mut self) -> Result<()> {
        let next = self.peek();
        match next.token {
            Token::Eof => Ok(()),
            ref other => Err(ParseError::syntax(
                format!("expected end of input, found {}", other.describe()),
                next.position,
            )),
        }
    }

    fn expect_lparen(&mut self) -> Result<Position> {
        let next = self.advance();
        match next.token {
            Token::LParen => Ok(next.position),
            other => Err(ParseError::syntax(
                format!("expected '(', found {}", other.describe()),
                next.position,
            )),
        }
    }

    fn expect_rparen(&mut self, open: Position) -> Result<()> {
        let next = self.advance();
        match next.token {
            Token::RParen => Ok(()),
            Token::Eof => Err(ParseError::syntax(
                format!("unclosed '(' opened at {}", open),
                next.position,
            )),
            other => Err(ParseError::syntax(
                format!("expected ')', found {}", other.describe()),
                next.position,
            )),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        let next = self.advance();
        match next.token {
            Token::Symbol(ref s) if s == keyword => Ok(()),
            other => Err(ParseError::syntax(
                format!("expected '{}', found {}", keyword, other.describe()),
                next.position,
            )),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String> {
        let next = self.advance();
        match next.token {
            Token::Str(s) => Ok(s),
            other => Err(ParseError::syntax(
                format!("expected {} string, found {}", what, other.describe()),
                next.position,
            )),
        }
    }

    fn parse_type(&mut self) -> Result<ValueType> {
        let next = self.advance();
        let name = match next.token {
            Token::Str(s) | Token::Symbol(s) => s,
            other => {
                return Err(ParseError::syntax(
                    format!("expected type name, found {}", other.describe()),
                    next.position,
                ))
            }
        };
        name.parse::<ValueType>()
            .map_err(|_| ParseError::syntax(format!("unknown type '{}'", name), next.position))
    }

    fn parse_ruleset(&mut self) -> Result<Ruleset> {
        let open = self.expect_lparen()?;
        self.expect_keyword("ruleset")?;
        let result_type = self.parse_type()?;

        let mut rules = Vec::new();
        while self.peek().token == Token::LParen {
            rules.push(self.parse_rule()?);
        }
        self.expect_rparen(open)?;

        Ruleset::new(result_type, rules).map_err(|source| ParseError::Signature {
            source,
            position: open,
        })
    }

    fn parse_rule(&mut self) -> Result<Rule> {
        let open = self.expect_lparen()?;
        self.expect_keyword("rule")?;
        let condition = self.parse_expr(1)?;
        let result = self.parse_expr(1)?;
        self.expect_rparen(open)?;

        Rule::new(condition, result).map_err(|source| ParseError::Signature {
            source,
            position: open,
        })
    }

    fn parse_expr(&mut self, depth: usize) -> Result<Expression> {
        let next = self.advance();
        match next.token {
            Token::Str(s) => Ok(Expression::literal(s)),
            Token::Bool(b) => Ok(Expression::literal(b)),
            Token::Number(text) => parse_number(&text, next.position),
            Token::LParen => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::syntax(
                        format!("expression nested deeper than {} levels", MAX_DEPTH),
                        next.position,
                    ));
                }
                self.parse_form(next.position, depth)
            }
            Token::Symbol(s) => Err(ParseError::syntax(
                format!("unexpected symbol '{}' outside of a form", s),
                next.position,
            )),
            other => Err(ParseError::syntax(
                format!("expected expression, found {}", other.describe()),
                next.position,
            )),
        }
    }

    fn parse_form(&mut self, open: Position, depth: usize) -> Result<Expression> {
        let head = self.advance();
        let symbol = match head.token {
            Token::Symbol(s) => s,
            other => {
                return Err(ParseError::syntax(
                    format!("expected operator, found {}", other.describe()),
                    head.position,
                ))
            }
        };

        match symbol.as_str() {
            "param" => {
                let name = self.expect_string("parameter name")?;
                let value_type = self.parse_type()?;
                self.expect_rparen(open)?;
                Ok(Expression::param(name, value_type))
            }
            "value" => {
                let value_type = self.parse_type()?;
                let data_pos = self.peek().position;
                let data = self.expect_string("literal data")?;
                self.expect_rparen(open)?;
                Value::parse(value_type, &data)
                    .map(Expression::Literal)
                    .map_err(|e| ParseError::syntax(e.to_string(), data_pos))
            }
            _ => {
                let op = symbols::resolve(&symbol).ok_or_else(|| {
                    ParseError::syntax(format!("unknown operator '{}'", symbol), head.position)
                })?;

                let mut operands = Vec::new();
                while !matches!(self.peek().token, Token::RParen | Token::Eof) {
                    operands.push(self.parse_expr(depth + 1)?);
                }
                self.expect_rparen(open)?;

                Expression::operation(op, operands).map_err(|source| ParseError::Signature {
                    source,
                    position: open,
                })
            }
        }
    }
}

fn parse_number(text: &str, position: Position) -> Result<Expression> {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Expression::literal)
            .map_err(|_| ParseError::syntax(format!("invalid float literal '{}'", text), position))
    } else {
        text.parse::<i64>().map(Expression::literal).map_err(|_| {
            ParseError::syntax(format!("integer literal '{}' out of range", text), position)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::{ErrorKind, Operator};

    #[test]
    fn test_literals() {
        assert_eq!(ExpressionParser::parse("42").unwrap(), Expression::literal(42i64));
        assert_eq!(ExpressionParser::parse("-1.5").unwrap(), Expression::literal(-1.5));
        assert_eq!(ExpressionParser::parse("#f").unwrap(), Expression::literal(false));
        assert_eq!(ExpressionParser::parse(r#""hi""#).unwrap(), Expression::literal("hi"));
    }

    #[test]
    fn test_param_and_value_forms() {
        assert_eq!(
            ExpressionParser::parse(r#"(param "age" "int64")"#).unwrap(),
            Expression::int64_param("age")
        );
        assert_eq!(
            ExpressionParser::parse(r#"(value "float64" "0.5")"#).unwrap(),
            Expression::literal(0.5)
        );
        assert!(ExpressionParser::parse(r#"(value "int64" "abc")"#).is_err());
    }

    #[test]
    fn test_aliases() {
        let expr = ExpressionParser::parse("(>= 3 2)").unwrap();
        match expr {
            Expression::Operation(op) => assert_eq!(op.op(), Operator::Gte),
            other => panic!("expected operation, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_overflow_literal() {
        let err = ExpressionParser::parse("99999999999999999999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_trailing_input() {
        let err = ExpressionParser::parse("#t #f").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
        assert_eq!(err.position().column, 4);
    }

    #[test]
    fn test_depth_limit() {
        let src = format!("{}#t{}", "(not ".repeat(300), ")".repeat(300));
        let err = ExpressionParser::parse(&src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_let_requires_param_binder() {
        let err = ExpressionParser::parse(r#"(let "n" 1 #t)"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);

        let expr = ExpressionParser::parse(r#"(let (param "n" "int64") 1 (param "n" "int64"))"#)
            .unwrap();
        assert_eq!(expr.value_type(), verdict_core::ValueType::Int64);
    }
}
