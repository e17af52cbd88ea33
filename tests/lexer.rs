use ada_frontend::lexer::{Scanner, ScannerConfig};
use ada_frontend::token::{TokenKind, TokenVocabulary};
use pretty_assertions::assert_eq;

fn scan(source: &str) -> ada_frontend::lexer::ScanResult {
    let vocab = TokenVocabulary::new();
    let mut scanner = Scanner::new(&vocab, ScannerConfig::default());
    scanner.analyze(source).expect("accumulate mode never halts")
}

#[test]
fn minimal_procedure_tokenizes_exactly() {
    let result = scan("procedure P is begin end P;");
    let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Procedure,
            TokenKind::Id,
            TokenKind::Is,
            TokenKind::Begin,
            TokenKind::End,
            TokenKind::Id,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comment_advances_eof_to_line_two() {
    let result = scan("-- comment\nprocedure P is begin end P;");
    let eof = result.tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.line, 2);
}

#[test]
fn too_long_identifier_is_dropped_from_the_stream() {
    let result = scan("procedure ThisIdentifierIsWayTooLong is begin end P;");
    assert!(result
        .tokens
        .iter()
        .all(|t| t.lexeme != "ThisIdentifierIsWayTooLong"));
    assert!(result.errors.iter().any(|e| e.contains("exceeds maximum length")));
}

#[test]
fn unterminated_string_emits_no_literal_token() {
    let result = scan("\"abc");
    assert!(result.tokens.iter().all(|t| t.kind != TokenKind::Literal));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn case_insensitivity_holds_for_reserved_words_but_not_identifiers() {
    let reserved = scan("BEGIN Begin begin");
    assert!(reserved.tokens[..3].iter().all(|t| t.kind == TokenKind::Begin));

    let identifiers = scan("foo Foo FOO");
    assert!(identifiers.tokens[..3].iter().all(|t| t.kind == TokenKind::Id));
    let lexemes: Vec<&str> = identifiers.tokens[..3].iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["foo", "Foo", "FOO"]);
}

#[test]
fn determinism_across_repeated_scans() {
    let first = scan("procedure P is X : INTEGER; begin end P;");
    let second = scan("procedure P is X : INTEGER; begin end P;");
    assert_eq!(first, second);
}

#[test]
fn literal_round_trip_restores_doubled_quotes() {
    let result = scan(r#""say ""hi""""#);
    let literal = result
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::Literal)
        .expect("literal token");
    let decoded = match &literal.value {
        Some(ada_frontend::token::TokenValue::Text(text)) => text.clone(),
        other => panic!("expected text value, got {other:?}"),
    };
    let re_encoded = format!("\"{}\"", decoded.replace('"', "\"\""));
    assert_eq!(re_encoded, literal.lexeme);
}
