use ada_frontend::lexer::{Scanner, ScannerConfig};
use ada_frontend::parser::{Parser, ParserConfig};
use ada_frontend::token::TokenVocabulary;
use pretty_assertions::assert_eq;

fn parse(source: &str, config: ParserConfig) -> ada_frontend::parser::ParseOutcome {
    let vocab = TokenVocabulary::new();
    let mut scanner = Scanner::new(&vocab, ScannerConfig::default());
    let scan = scanner.analyze(source).unwrap();
    let mut parser = Parser::new(scan.tokens, &vocab, config);
    parser.parse().unwrap()
}

#[test]
fn scenario_minimal_procedure_succeeds() {
    let outcome = parse("procedure P is begin end P;", ParserConfig::default());
    assert!(outcome.success);
    assert!(outcome.errors.is_empty());
}

#[test]
fn scenario_integer_declaration_succeeds() {
    let outcome = parse(
        "procedure P is X : INTEGER; begin end P;",
        ParserConfig::default(),
    );
    assert!(outcome.success);
}

#[test]
fn scenario_constant_value_is_recorded_in_tree() {
    let config = ParserConfig { build_parse_tree: true, ..Default::default() };
    let outcome = parse("procedure P is X : CONSTANT := 42; begin end P;", config);
    assert!(outcome.success);
    let rendered = outcome.tree.unwrap().render();
    assert!(rendered.contains("CONSTANT"));
    assert!(rendered.contains("ASSIGN"));
    assert!(rendered.contains("NUM (42)"));
}

#[test]
fn scenario_end_identifier_mismatch_is_not_a_parser_concern() {
    let outcome = parse("procedure P is begin end Q;", ParserConfig::default());
    assert!(outcome.success);
    assert!(outcome.errors.is_empty());
}

#[test]
fn scenario_too_long_identifier_leaves_expected_id_error() {
    let outcome = parse(
        "procedure ThisIdentifierIsWayTooLong is begin end P;",
        ParserConfig::default(),
    );
    assert!(!outcome.success);
    assert!(outcome.errors.iter().any(|e| e.contains("Expected ID")));
}

#[test]
fn scenario_missing_semicolon_is_reported_at_eof() {
    let outcome = parse("procedure P is X : INTEGER", ParserConfig::default());
    assert!(!outcome.success);
    assert!(outcome.errors.iter().any(|e| e.contains("Expected SEMICOLON")));
}

#[test]
fn tree_flag_does_not_change_success_or_errors() {
    let source = "procedure P is X : ; begin end P;";
    let with_tree = parse(source, ParserConfig { build_parse_tree: true, ..Default::default() });
    let without_tree = parse(source, ParserConfig::default());
    assert_eq!(with_tree.success, without_tree.success);
    assert_eq!(with_tree.errors, without_tree.errors);
}

#[test]
fn panic_recovery_resynchronises_on_semicolon() {
    let config = ParserConfig { panic_mode_recover: true, ..Default::default() };
    let outcome = parse(
        "procedure P is X : ; Y : INTEGER; begin end P;",
        config,
    );
    assert!(!outcome.errors.is_empty());
    assert!(outcome.errors.iter().any(|e| e.contains("Expected a type")));
}

#[test]
fn halt_mode_stops_at_the_first_error() {
    let vocab = TokenVocabulary::new();
    let mut scanner = Scanner::new(&vocab, ScannerConfig::default());
    let scan = scanner.analyze("procedure P is X : ; begin end P;").unwrap();
    let mut parser = Parser::new(
        scan.tokens,
        &vocab,
        ParserConfig { stop_on_error: true, ..Default::default() },
    );
    let result = parser.parse();
    assert!(result.is_err());
}
