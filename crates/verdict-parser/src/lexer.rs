//! Tokenizer for the s-expression syntax
//!
//! Whitespace and `;` comments are produced as tokens by [`Lexer::next_token`]
//! and dropped by [`Lexer::tokenize`].

use crate::error::{ParseError, Position, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Quoted string (content without quotes, escapes resolved)
    Str(String),
    /// Numeric literal, kept as source text until the parser types it
    Number(String),
    /// `#t` or `#f`
    Bool(bool),
    /// Operator names, `param`, `value`, `ruleset`, `rule` and type names
    Symbol(String),
    /// Run of spaces, tabs, CR and LF
    Whitespace,
    /// `;` to end of line (text without the `;`)
    Comment(String),
    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Str(s) => format!("string {:?}", s),
            Token::Number(n) => format!("number {}", n),
            Token::Bool(b) => format!("bool {}", if *b { "#t" } else { "#f" }),
            Token::Symbol(s) => format!("symbol '{}'", s),
            Token::Whitespace => "whitespace".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Token with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_delimiter(c: char) -> bool {
    is_whitespace(c) || matches!(c, '(' | ')' | '"' | ';')
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: Position::start(),
        }
    }

    /// Tokenize the whole input, skipping whitespace and comments.
    /// The last token is always [`Token::Eof`].
    pub fn tokenize(src: &'a str) -> Result<Vec<Spanned>> {
        let mut lexer = Lexer::new(src);
        let mut tokens = Vec::new();
        loop {
            let spanned = lexer.next_token()?;
            match spanned.token {
                Token::Whitespace | Token::Comment(_) => continue,
                Token::Eof => {
                    tokens.push(spanned);
                    return Ok(tokens);
                }
                _ => tokens.push(spanned),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned> {
        let position = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Spanned {
                    token: Token::Eof,
                    position,
                })
            }
        };

        let token = if is_whitespace(c) {
            while self.peek().is_some_and(is_whitespace) {
                self.bump();
            }
            Token::Whitespace
        } else if c == ';' {
            self.bump();
            let text = self.take_while(|c| c != '\n');
            Token::Comment(text.to_string())
        } else if c == '(' {
            self.bump();
            Token::LParen
        } else if c == ')' {
            self.bump();
            Token::RParen
        } else if c == '"' {
            self.lex_string(position)?
        } else if c.is_ascii_digit() || (c == '-' && self.peek_nth(1).is_some_and(|d| d.is_ascii_digit())) {
            self.lex_number(position)?
        } else if c == '#' {
            let text = self.take_while(|c| !is_delimiter(c));
            match text {
                "#t" => Token::Bool(true),
                "#f" => Token::Bool(false),
                other => {
                    return Err(ParseError::lex(
                        format!("invalid boolean literal '{}'", other),
                        position,
                    ))
                }
            }
        } else {
            Token::Symbol(self.take_while(|c| !is_delimiter(c)).to_string())
        };

        Ok(Spanned { token, position })
    }

    fn lex_string(&mut self, start: Position) -> Result<Token> {
        self.bump();
        let mut s = String::new();
        loop {
            let escape_pos = self.pos;
            match self.bump() {
                None => return Err(ParseError::lex("unterminated string literal", start)),
                Some('"') => return Ok(Token::Str(s)),
                Some('\\') => match self.bump() {
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some(other) => {
                        return Err(ParseError::lex(
                            format!("invalid escape '\\{}'", other),
                            escape_pos,
                        ))
                    }
                    None => return Err(ParseError::lex("unterminated string literal", start)),
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn lex_number(&mut self, start: Position) -> Result<Token> {
        let begin = self.pos.offset;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.take_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.take_while(|c| c.is_ascii_digit());
        }
        let src = self.src;
        let text = &src[begin..self.pos.offset];
        if let Some(c) = self.peek() {
            if !is_delimiter(c) {
                let rest = self.take_while(|c| !is_delimiter(c));
                return Err(ParseError::lex(
                    format!("invalid number literal '{}{}'", text, rest),
                    start,
                ));
            }
        }
        Ok(Token::Number(text.to_string()))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos.offset..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let begin = self.pos.offset;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        let src = self.src;
        &src[begin..self.pos.offset]
    }
}
