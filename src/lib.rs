//! Lexer and recursive-descent parser for a declaration-oriented subset of
//! Ada: a closed token vocabulary, a longest-match scanner, and a
//! single-token-lookahead predictive parser, each independently configurable
//! between halt-on-first-error and accumulate-all-errors.

pub mod adapter;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod token;

pub use adapter::{analyze_source, AdapterConfig, AnalysisError, AnalysisReport};
