use std::error::Error;
use std::fmt::{self, Display};

/// Raised by the scanner instead of recovering, only when configured with
/// `stop_on_error`. Accumulate-mode scanning never produces this; the
/// condition is instead appended to the scanner's error list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

impl Error for LexicalError {}

/// Raised by the parser instead of recovering, only when configured with
/// `stop_on_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

impl Error for ParseError {}
