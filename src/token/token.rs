use std::fmt::{self, Display};

use super::kind::TokenKind;

/// At most one decoded payload accompanies a token, chosen by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Real(f64),
    Text(String),
}

/// Immutable record produced by the scanner, consumed read-only by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            value: None,
        }
    }

    pub fn with_int(mut self, value: i64) -> Self {
        self.value = Some(TokenValue::Int(value));
        self
    }

    pub fn with_real(mut self, value: f64) -> Self {
        self.value = Some(TokenValue::Real(value));
        self
    }

    pub fn with_text(mut self, value: String) -> Self {
        self.value = Some(TokenValue::Text(value));
        self
    }

    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenKind::Eof, "EOF", line, column)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.kind, self.lexeme)
    }
}
