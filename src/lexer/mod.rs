//! Longest-match scanner over an ordered pattern table (see
//! [`TokenVocabulary::pattern_table`]).

use crate::error::LexicalError;
use crate::logging::{FacadeSink, Sink};
use crate::token::{Token, TokenKind, TokenVocabulary};

const MAX_IDENTIFIER_LEN: usize = 17;
const FACADE: FacadeSink = FacadeSink;

/// Scanner behaviour that does not change the token grammar itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScannerConfig {
    pub stop_on_error: bool,
}

/// Result of a non-halting [`Scanner::analyze`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<String>,
}

/// Consumes one source string and produces one [`ScanResult`]. Not reusable
/// across inputs — construct a fresh scanner per request.
pub struct Scanner<'a> {
    vocab: &'a TokenVocabulary,
    config: ScannerConfig,
    logger: &'a dyn Sink,
}

impl<'a> Scanner<'a> {
    pub fn new(vocab: &'a TokenVocabulary, config: ScannerConfig) -> Self {
        Self::with_logger(vocab, config, &FACADE)
    }

    pub fn with_logger(vocab: &'a TokenVocabulary, config: ScannerConfig, logger: &'a dyn Sink) -> Self {
        Self { vocab, config, logger }
    }

    pub fn analyze(&mut self, source: &str) -> Result<ScanResult, LexicalError> {
        let chars: Vec<char> = source.chars().collect();
        let mut cursor = Cursor { pos: 0, line: 1, column: 1 };
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        self.logger.debug("starting tokenization");

        loop {
            self.skip_trivia(&chars, &mut cursor);

            if cursor.pos >= chars.len() {
                break;
            }

            if chars[cursor.pos] == '"' && !self.string_terminates_on_line(&chars, cursor.pos) {
                let msg = format!(
                    "Unterminated string literal starting at line {}, column {}.",
                    cursor.line, cursor.column
                );
                self.logger.error(&msg);
                errors.push(msg);
                self.skip_to_line_end(&chars, &mut cursor);
                continue;
            }

            match self.match_longest(&chars, cursor.pos) {
                Some((name, len)) => {
                    let lexeme: String = chars[cursor.pos..cursor.pos + len].iter().collect();
                    let start = cursor;
                    let outcome = self.classify(name, &lexeme, start.line, start.column, &mut errors)?;
                    cursor.advance_over(&lexeme);
                    if let Some(token) = outcome {
                        self.logger.debug(&format!("matched token {token}"));
                        tokens.push(token);
                    }
                }
                None => {
                    let msg = format!(
                        "Unrecognized character '{}' at line {}, column {}.",
                        chars[cursor.pos], cursor.line, cursor.column
                    );
                    self.logger.error(&msg);
                    errors.push(msg);
                    cursor.pos += 1;
                    cursor.column += 1;
                }
            }
        }

        tokens.push(Token::eof(cursor.line, cursor.column));
        self.logger.debug("tokenization complete");
        Ok(ScanResult { tokens, errors })
    }

    /// Consumes whitespace, then comments, then whitespace again, etc. until
    /// neither advances the cursor — they can interleave arbitrarily.
    fn skip_trivia(&self, chars: &[char], cursor: &mut Cursor) {
        loop {
            let before = cursor.pos;
            if let Some(len) = (self.vocab.whitespace_matcher())(chars, cursor.pos) {
                let text: String = chars[cursor.pos..cursor.pos + len].iter().collect();
                cursor.advance_over(&text);
            }
            if let Some(len) = (self.vocab.comment_matcher())(chars, cursor.pos) {
                let text: String = chars[cursor.pos..cursor.pos + len].iter().collect();
                cursor.advance_over(&text);
            }
            if cursor.pos == before {
                break;
            }
        }
    }

    fn string_terminates_on_line(&self, chars: &[char], pos: usize) -> bool {
        let mut i = pos + 1;
        while let Some(c) = chars.get(i) {
            match c {
                '\n' => return false,
                '"' => return true,
                _ => i += 1,
            }
        }
        false
    }

    fn skip_to_line_end(&self, chars: &[char], cursor: &mut Cursor) {
        while let Some(c) = chars.get(cursor.pos) {
            if *c == '\n' {
                break;
            }
            cursor.pos += 1;
            cursor.column += 1;
        }
        if chars.get(cursor.pos) == Some(&'\n') {
            cursor.pos += 1;
            cursor.line += 1;
            cursor.column = 1;
        }
    }

    fn match_longest(&self, chars: &[char], pos: usize) -> Option<(&'static str, usize)> {
        for entry in self.vocab.pattern_table() {
            if entry.name == "COMMENT" || entry.name == "WHITESPACE" {
                continue;
            }
            if let Some(len) = (entry.matcher)(chars, pos) {
                return Some((entry.name, len));
            }
        }
        None
    }

    fn classify(
        &self,
        name: &'static str,
        lexeme: &str,
        line: usize,
        column: usize,
        errors: &mut Vec<String>,
    ) -> Result<Option<Token>, LexicalError> {
        let token = match name {
            "ID" => {
                let upper = lexeme.to_ascii_uppercase();
                if let Some(kind) = self.vocab.reserved_kind(&upper) {
                    Some(Token::new(kind, lexeme, line, column))
                } else if lexeme.chars().count() > MAX_IDENTIFIER_LEN {
                    let msg = format!(
                        "Identifier '{lexeme}' exceeds maximum length at line {line}, column {column}."
                    );
                    self.logger.error(&msg);
                    errors.push(msg);
                    None
                } else {
                    Some(Token::new(TokenKind::Id, lexeme, line, column))
                }
            }
            "NUM" => match lexeme.parse::<i64>() {
                Ok(value) => Some(Token::new(TokenKind::Num, lexeme, line, column).with_int(value)),
                Err(_) => {
                    let msg = format!("Invalid number '{lexeme}' at line {line}, column {column}.");
                    self.logger.error(&msg);
                    if self.config.stop_on_error {
                        return Err(LexicalError { message: msg, line, column });
                    }
                    errors.push(msg);
                    Some(Token::new(TokenKind::Num, lexeme, line, column))
                }
            },
            "REAL" => match lexeme.parse::<f64>() {
                Ok(value) => Some(Token::new(TokenKind::Real, lexeme, line, column).with_real(value)),
                Err(_) => {
                    let msg = format!("Invalid real number '{lexeme}' at line {line}, column {column}.");
                    self.logger.error(&msg);
                    if self.config.stop_on_error {
                        return Err(LexicalError { message: msg, line, column });
                    }
                    errors.push(msg);
                    Some(Token::new(TokenKind::Real, lexeme, line, column))
                }
            },
            "LITERAL" => {
                if !lexeme.ends_with('"') || lexeme.chars().count() < 2 {
                    let msg = format!(
                        "Unterminated string literal starting at line {line}, column {column}."
                    );
                    self.logger.error(&msg);
                    if self.config.stop_on_error {
                        return Err(LexicalError { message: msg, line, column });
                    }
                    errors.push(msg);
                    None
                } else {
                    let inner = &lexeme[1..lexeme.len() - 1];
                    let decoded = inner.replace("\"\"", "\"");
                    Some(Token::new(TokenKind::Literal, lexeme, line, column).with_text(decoded))
                }
            }
            "CHAR_LITERAL" => {
                if !lexeme.ends_with('\'') || lexeme.chars().count() < 2 {
                    let msg = format!(
                        "Unterminated character literal starting at line {line}, column {column}."
                    );
                    self.logger.error(&msg);
                    if self.config.stop_on_error {
                        return Err(LexicalError { message: msg, line, column });
                    }
                    errors.push(msg);
                    let decoded = lexeme[1..].to_string();
                    Some(Token::new(TokenKind::CharLiteral, lexeme, line, column).with_text(decoded))
                } else {
                    let inner = &lexeme[1..lexeme.len() - 1];
                    let decoded = inner.replace("''", "'");
                    Some(Token::new(TokenKind::CharLiteral, lexeme, line, column).with_text(decoded))
                }
            }
            "CONCAT" => Some(Token::new(TokenKind::Concat, lexeme, line, column)),
            "ASSIGN" => Some(Token::new(TokenKind::Assign, lexeme, line, column)),
            "RELOP" => Some(Token::new(TokenKind::Relop, lexeme, line, column)),
            "ADDOP" => Some(Token::new(TokenKind::Addop, lexeme, line, column)),
            "MULOP" => Some(Token::new(TokenKind::Mulop, lexeme, line, column)),
            "LPAREN" => Some(Token::new(TokenKind::LParen, lexeme, line, column)),
            "RPAREN" => Some(Token::new(TokenKind::RParen, lexeme, line, column)),
            "COMMA" => Some(Token::new(TokenKind::Comma, lexeme, line, column)),
            "COLON" => Some(Token::new(TokenKind::Colon, lexeme, line, column)),
            "SEMICOLON" => Some(Token::new(TokenKind::Semicolon, lexeme, line, column)),
            "DOT" => Some(Token::new(TokenKind::Dot, lexeme, line, column)),
            other => unreachable!("pattern table produced unknown entry '{other}'"),
        };
        Ok(token)
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Advances past `text`, accounting for embedded newlines (only possible
    /// inside literals and comments).
    fn advance_over(&mut self, text: &str) {
        let newlines = text.matches('\n').count();
        if newlines > 0 {
            self.line += newlines;
            self.column = text.rsplit('\n').next().map_or(1, |suffix| suffix.chars().count() + 1);
        } else {
            self.column += text.chars().count();
        }
        self.pos += text.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> ScanResult {
        let vocab = TokenVocabulary::new();
        let mut scanner = Scanner::new(&vocab, ScannerConfig::default());
        scanner.analyze(source).expect("accumulate mode never errors")
    }

    #[test]
    fn terminator_invariant_holds() {
        let result = scan("procedure P is begin end P;");
        assert_eq!(result.tokens.last().unwrap().kind, TokenKind::Eof);
        assert!(result.tokens[..result.tokens.len() - 1]
            .iter()
            .all(|t| t.kind != TokenKind::Eof));
    }

    #[test]
    fn reserved_words_fold_case_insensitively() {
        let result = scan("PROCEDURE Procedure procedure");
        assert!(result.tokens[..3].iter().all(|t| t.kind == TokenKind::Procedure));
    }

    #[test]
    fn operator_keywords_are_not_identifiers() {
        let result = scan("a or b and c rem d mod e");
        let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Id,
                TokenKind::Addop,
                TokenKind::Id,
                TokenKind::Mulop,
                TokenKind::Id,
                TokenKind::Mulop,
                TokenKind::Id,
                TokenKind::Mulop,
                TokenKind::Id,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_length_bound_is_enforced() {
        let result = scan("ThisIdentifierIsWayTooLong");
        assert!(result.tokens.iter().all(|t| t.kind != TokenKind::Id));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("exceeds maximum length"));
    }

    #[test]
    fn string_literal_round_trips() {
        let result = scan(r#""a""b""#);
        let value = result.tokens[0].value.clone();
        assert_eq!(result.tokens[0].lexeme, r#""a""b""#);
        assert_eq!(
            value,
            Some(crate::token::TokenValue::Text("a\"b".to_string()))
        );
    }

    #[test]
    fn unterminated_string_is_recorded_and_skipped() {
        let result = scan("\"abc");
        assert!(result.tokens.iter().all(|t| t.kind != TokenKind::Literal));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Unterminated string literal"));
    }

    #[test]
    fn comment_then_code_advances_line() {
        let result = scan("-- comment\nprocedure");
        assert_eq!(result.tokens[0].kind, TokenKind::Procedure);
        assert_eq!(result.tokens[0].line, 2);
    }

    #[test]
    fn real_is_matched_before_num() {
        let result = scan("3.14");
        assert_eq!(result.tokens[0].kind, TokenKind::Real);
        assert_eq!(result.tokens[0].lexeme, "3.14");
    }

    #[test]
    fn unrecognised_character_recovers() {
        let result = scan("a # b");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Unrecognized character"));
        assert_eq!(result.tokens.len(), 3); // a, b, EOF
    }
}
