//! Structured entry point combining the scanner and parser into one report,
//! suitable for embedding in a CLI, a test harness, or a language server.

use serde::Serialize;

use crate::error::{LexicalError, ParseError};
use crate::lexer::{Scanner, ScannerConfig};
use crate::logging::{FacadeSink, Sink};
use crate::parser::{Parser, ParserConfig};
use crate::token::TokenVocabulary;

const FACADE: FacadeSink = FacadeSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct AdapterConfig {
    pub stop_on_error: bool,
    pub panic_mode_recover: bool,
    pub build_parse_tree: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenSummary {
    pub kind: String,
    pub lexeme: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub tokens: Vec<TokenSummary>,
    pub errors: Vec<String>,
    pub tree: Option<String>,
}

/// One of the two ways analysis can end without producing a report: a halted
/// scan or a halted parse, each carrying the error that stopped it.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    Lexical(LexicalError),
    Parse(ParseError),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Lexical(e) => write!(f, "lexical error: {e}"),
            AnalysisError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Runs the full scan-then-parse pipeline once over `source`. Scanning and
/// parsing each get a fresh [`TokenVocabulary`]-backed phase; a scanner or
/// parser is never reused across requests.
pub fn analyze_source(source: &str, config: AdapterConfig) -> Result<AnalysisReport, AnalysisError> {
    analyze_source_with_logger(source, config, &FACADE)
}

pub fn analyze_source_with_logger(
    source: &str,
    config: AdapterConfig,
    logger: &dyn Sink,
) -> Result<AnalysisReport, AnalysisError> {
    let vocab = TokenVocabulary::new();

    let scanner_config = ScannerConfig { stop_on_error: config.stop_on_error };
    let mut scanner = Scanner::with_logger(&vocab, scanner_config, logger);
    let scan = scanner.analyze(source).map_err(AnalysisError::Lexical)?;

    let parser_config = ParserConfig {
        stop_on_error: config.stop_on_error,
        panic_mode_recover: config.panic_mode_recover,
        build_parse_tree: config.build_parse_tree,
    };
    let mut parser = Parser::with_logger(scan.tokens.clone(), &vocab, parser_config, logger);
    let outcome = parser.parse().map_err(AnalysisError::Parse)?;

    let mut errors = scan.errors;
    errors.extend(outcome.errors);

    let tokens = scan
        .tokens
        .iter()
        .map(|t| TokenSummary { kind: t.kind.name().to_string(), lexeme: t.lexeme.clone() })
        .collect();

    Ok(AnalysisReport {
        success: errors.is_empty(),
        tokens,
        errors,
        tree: outcome.tree.map(|t| t.render()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_mode_reports_combined_errors() {
        let report = analyze_source("procedure P is X : ; begin end P;", AdapterConfig::default()).unwrap();
        assert!(!report.success);
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn tree_is_present_only_when_requested() {
        let config = AdapterConfig { build_parse_tree: true, ..Default::default() };
        let report = analyze_source("procedure P is begin end P;", config).unwrap();
        assert!(report.success);
        assert!(report.tree.is_some());
        assert!(report.tree.unwrap().contains("PROCEDURE"));
    }

    #[test]
    fn halt_mode_surfaces_first_lexical_error() {
        let config = AdapterConfig { stop_on_error: true, ..Default::default() };
        let result = analyze_source("9999999999999999999999", config);
        assert!(matches!(result, Err(AnalysisError::Lexical(_))));
    }

    #[test]
    fn token_summaries_expose_kind_name_and_lexeme() {
        let report = analyze_source("procedure P is begin end P;", AdapterConfig::default()).unwrap();
        assert_eq!(report.tokens[0].kind, "PROCEDURE");
        assert_eq!(report.tokens[0].lexeme, "procedure");
    }
}
