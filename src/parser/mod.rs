//! Predictive, single-token-lookahead recursive-descent parser over the
//! declaration-oriented grammar described in the crate's design notes.

mod tree;

pub use tree::ParseTreeNode;

use std::collections::HashSet;

use crate::error::ParseError;
use crate::logging::{FacadeSink, Sink};
use crate::token::{Token, TokenKind, TokenVocabulary};

const FACADE: FacadeSink = FacadeSink;

/// Recommended default synchronisation set for panic-mode recovery.
pub fn default_sync_set() -> HashSet<TokenKind> {
    [TokenKind::Semicolon, TokenKind::Begin, TokenKind::End, TokenKind::Eof]
        .into_iter()
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ParserConfig {
    pub stop_on_error: bool,
    pub panic_mode_recover: bool,
    pub build_parse_tree: bool,
}

/// Outcome of a non-halting [`Parser::parse`] call.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub success: bool,
    pub errors: Vec<String>,
    pub tree: Option<ParseTreeNode>,
}

/// Consumes one token sequence and produces one [`ParseOutcome`]. Not
/// reusable across token sequences — construct a fresh parser per request.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    index: usize,
    vocab: &'a TokenVocabulary,
    config: ParserConfig,
    logger: &'a dyn Sink,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, vocab: &'a TokenVocabulary, config: ParserConfig) -> Self {
        Self::with_logger(tokens, vocab, config, &FACADE)
    }

    pub fn with_logger(
        tokens: Vec<Token>,
        vocab: &'a TokenVocabulary,
        config: ParserConfig,
        logger: &'a dyn Sink,
    ) -> Self {
        assert!(!tokens.is_empty(), "token sequence must contain at least EOF");
        Self { tokens, index: 0, vocab, config, logger, errors: Vec::new() }
    }

    /// Parses `Prog`, then requires EOF. Returns `Ok(success)` in
    /// accumulate-mode, or `Err` on the first recorded error when
    /// `stop_on_error` is set.
    pub fn parse(&mut self) -> Result<ParseOutcome, ParseError> {
        self.logger.debug("starting parse");
        let tree = self.parse_prog()?;

        if self.current().kind != TokenKind::Eof {
            self.report_error("Extra tokens found after program end.")?;
        }

        let success = self.errors.is_empty();
        if success {
            self.logger.info("parsing completed successfully with no errors");
        } else {
            self.logger.info(&format!("parsing completed with {} error(s)", self.errors.len()));
        }

        Ok(ParseOutcome { success, errors: self.errors.clone(), tree })
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// The current token's kind, re-resolving an `ID` lexeme that happens to
    /// spell a reserved word to that reserved word's kind. The scanner
    /// already folds reserved words at scan time; this only matters for
    /// tokens a caller constructed directly (e.g. in tests) or future
    /// grammar extensions that re-use raw identifiers.
    fn effective_kind(&self) -> TokenKind {
        let token = self.current();
        if token.kind == TokenKind::Id {
            if let Some(kind) = self.vocab.reserved_kind(&token.lexeme) {
                return kind;
            }
        }
        token.kind
    }

    fn report_error(&mut self, message: &str) -> Result<(), ParseError> {
        let token = self.current();
        let (line, column) = (token.line, token.column);
        let full = format!("Error at line {line}, column {column}: {message}");
        self.logger.error(&full);
        self.errors.push(full.clone());
        if self.config.stop_on_error {
            return Err(ParseError { message: full, line, column });
        }
        Ok(())
    }

    /// Matches the current token against `expected`. On success, advances
    /// and returns the consumed token. On mismatch, records an error and,
    /// if panic recovery is enabled, resynchronises on [`default_sync_set`];
    /// otherwise leaves the cursor where it is.
    fn expect(&mut self, expected: TokenKind) -> Result<Option<Token>, ParseError> {
        if self.effective_kind() == expected {
            let token = self.current().clone();
            self.logger.debug(&format!("matched {expected} with token '{}'", token.lexeme));
            self.advance();
            Ok(Some(token))
        } else {
            let found = self.current().lexeme.clone();
            self.report_error(&format!("Expected {expected}, found '{found}'"))?;
            if self.config.panic_mode_recover {
                self.panic_recovery(&default_sync_set());
            }
            Ok(None)
        }
    }

    /// Matches and, when tree-building is on, attaches a leaf to `parent`.
    fn expect_leaf(
        &mut self,
        expected: TokenKind,
        parent: &mut Option<ParseTreeNode>,
    ) -> Result<(), ParseError> {
        let matched = self.expect(expected)?;
        if let (Some(parent), Some(token)) = (parent.as_mut(), matched) {
            parent.add_child(ParseTreeNode::leaf(expected.name(), token));
        }
        Ok(())
    }

    fn panic_recovery(&mut self, sync_set: &HashSet<TokenKind>) {
        self.logger.debug("entering panic-mode recovery");
        while !sync_set.contains(&self.effective_kind()) && self.current().kind != TokenKind::Eof {
            self.advance();
        }
        self.logger.debug("panic-mode recovery complete");
    }

    fn node(&self, name: &str) -> Option<ParseTreeNode> {
        self.config.build_parse_tree.then(|| ParseTreeNode::nonterminal(name))
    }

    fn adopt(&self, parent: &mut Option<ParseTreeNode>, child: Option<ParseTreeNode>) {
        if let (Some(parent), Some(child)) = (parent.as_mut(), child) {
            parent.add_child(child);
        }
    }

    // ---- Grammar ----
    //
    // Prog       -> PROCEDURE id Args IS DeclPart Procedures BEGIN SeqOfStmts END id ;
    // DeclPart   -> IdList : TypeMark ; DeclPart | ε
    // IdList     -> id (, id)*
    // TypeMark   -> INTEGERT | REALT | CHART | CONSTANT := Value
    // Value      -> NUM
    // Procedures -> Prog Procedures | ε
    // Args       -> ( ArgList ) | ε
    // ArgList    -> Mode IdList : TypeMark MoreArgs
    // MoreArgs   -> ; ArgList | ε
    // Mode       -> IN | OUT | INOUT | ε
    // SeqOfStmts -> ε

    fn parse_prog(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        let mut node = self.node("Prog");
        self.logger.debug("parsing Prog");
        self.expect_leaf(TokenKind::Procedure, &mut node)?;
        self.expect_leaf(TokenKind::Id, &mut node)?;
        let args = self.parse_args()?;
        self.adopt(&mut node, args);
        self.expect_leaf(TokenKind::Is, &mut node)?;
        let decl_part = self.parse_decl_part()?;
        self.adopt(&mut node, decl_part);
        let procedures = self.parse_procedures()?;
        self.adopt(&mut node, procedures);
        self.expect_leaf(TokenKind::Begin, &mut node)?;
        let seq = self.parse_seq_of_stmts();
        self.adopt(&mut node, seq);
        self.expect_leaf(TokenKind::End, &mut node)?;
        self.expect_leaf(TokenKind::Id, &mut node)?;
        self.expect_leaf(TokenKind::Semicolon, &mut node)?;
        Ok(node)
    }

    fn parse_decl_part(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        self.logger.debug("parsing DeclPart");
        if self.effective_kind() == TokenKind::Id {
            let mut node = self.node("DeclPart");
            let id_list = self.parse_id_list()?;
            self.adopt(&mut node, id_list);
            self.expect_leaf(TokenKind::Colon, &mut node)?;
            let type_mark = self.parse_type_mark()?;
            self.adopt(&mut node, type_mark);
            self.expect_leaf(TokenKind::Semicolon, &mut node)?;
            let rest = self.parse_decl_part()?;
            self.adopt(&mut node, rest);
            Ok(node)
        } else {
            self.logger.debug("DeclPart -> epsilon");
            Ok(self.node("DeclPart").map(|mut n| {
                n.add_child(ParseTreeNode::epsilon());
                n
            }))
        }
    }

    fn parse_id_list(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        let mut node = self.node("IdList");
        self.logger.debug("parsing IdList");
        self.expect_leaf(TokenKind::Id, &mut node)?;
        while self.effective_kind() == TokenKind::Comma {
            self.expect_leaf(TokenKind::Comma, &mut node)?;
            self.expect_leaf(TokenKind::Id, &mut node)?;
        }
        Ok(node)
    }

    fn parse_type_mark(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        let mut node = self.node("TypeMark");
        self.logger.debug("parsing TypeMark");
        match self.effective_kind() {
            TokenKind::IntegerT | TokenKind::RealT | TokenKind::CharT => {
                let kind = self.effective_kind();
                self.expect_leaf(kind, &mut node)?;
            }
            TokenKind::Const => {
                self.expect_leaf(TokenKind::Const, &mut node)?;
                self.expect_leaf(TokenKind::Assign, &mut node)?;
                let value = self.parse_value()?;
                self.adopt(&mut node, value);
            }
            _ => {
                self.report_error("Expected a type (INTEGERT, REALT, CHART) or a constant declaration.")?;
            }
        }
        Ok(node)
    }

    fn parse_value(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        let mut node = self.node("Value");
        self.logger.debug("parsing Value");
        self.expect_leaf(TokenKind::Num, &mut node)?;
        Ok(node)
    }

    fn parse_procedures(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        self.logger.debug("parsing Procedures");
        if self.effective_kind() == TokenKind::Procedure {
            let mut node = self.node("Procedures");
            let prog = self.parse_prog()?;
            self.adopt(&mut node, prog);
            let rest = self.parse_procedures()?;
            self.adopt(&mut node, rest);
            Ok(node)
        } else {
            self.logger.debug("Procedures -> epsilon");
            Ok(self.node("Procedures").map(|mut n| {
                n.add_child(ParseTreeNode::epsilon());
                n
            }))
        }
    }

    fn parse_args(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        self.logger.debug("parsing Args");
        if self.effective_kind() == TokenKind::LParen {
            let mut node = self.node("Args");
            self.expect_leaf(TokenKind::LParen, &mut node)?;
            let arg_list = self.parse_arg_list()?;
            self.adopt(&mut node, arg_list);
            self.expect_leaf(TokenKind::RParen, &mut node)?;
            Ok(node)
        } else {
            self.logger.debug("Args -> epsilon");
            Ok(self.node("Args").map(|mut n| {
                n.add_child(ParseTreeNode::epsilon());
                n
            }))
        }
    }

    fn parse_arg_list(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        let mut node = self.node("ArgList");
        self.logger.debug("parsing ArgList");
        let mode = self.parse_mode()?;
        self.adopt(&mut node, mode);
        let id_list = self.parse_id_list()?;
        self.adopt(&mut node, id_list);
        self.expect_leaf(TokenKind::Colon, &mut node)?;
        let type_mark = self.parse_type_mark()?;
        self.adopt(&mut node, type_mark);
        let more_args = self.parse_more_args()?;
        self.adopt(&mut node, more_args);
        Ok(node)
    }

    fn parse_more_args(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        self.logger.debug("parsing MoreArgs");
        if self.effective_kind() == TokenKind::Semicolon {
            let mut node = self.node("MoreArgs");
            self.expect_leaf(TokenKind::Semicolon, &mut node)?;
            let arg_list = self.parse_arg_list()?;
            self.adopt(&mut node, arg_list);
            Ok(node)
        } else {
            self.logger.debug("MoreArgs -> epsilon");
            Ok(self.node("MoreArgs").map(|mut n| {
                n.add_child(ParseTreeNode::epsilon());
                n
            }))
        }
    }

    fn parse_mode(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        self.logger.debug("parsing Mode");
        match self.effective_kind() {
            kind @ (TokenKind::In | TokenKind::Out | TokenKind::Inout) => {
                let mut node = self.node("Mode");
                self.expect_leaf(kind, &mut node)?;
                Ok(node)
            }
            _ => {
                self.logger.debug("Mode -> epsilon");
                Ok(self.node("Mode").map(|mut n| {
                    n.add_child(ParseTreeNode::epsilon());
                    n
                }))
            }
        }
    }

    fn parse_seq_of_stmts(&mut self) -> Option<ParseTreeNode> {
        self.logger.debug("parsing SeqOfStmts -> epsilon");
        self.node("SeqOfStmts").map(|mut n| {
            n.add_child(ParseTreeNode::epsilon());
            n
        })
    }
}
