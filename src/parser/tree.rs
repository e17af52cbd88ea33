use std::fmt::Write as _;

use crate::token::Token;

/// A node in the parse tree: either an internal nonterminal node (no token)
/// or a leaf derived from a matched terminal (token present). Owns its
/// children outright — the tree never shares or cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTreeNode {
    pub name: String,
    pub token: Option<Token>,
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    pub fn nonterminal(name: impl Into<String>) -> Self {
        Self { name: name.into(), token: None, children: Vec::new() }
    }

    pub fn leaf(name: impl Into<String>, token: Token) -> Self {
        Self { name: name.into(), token: Some(token), children: Vec::new() }
    }

    pub fn epsilon() -> Self {
        Self::nonterminal("\u{3b5}")
    }

    pub fn add_child(&mut self, child: ParseTreeNode) {
        self.children.push(child);
    }

    /// Depth-first, last-child-aware connector rendering.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "", true, true);
        out
    }

    fn render_into(&self, out: &mut String, prefix: &str, is_last: bool, is_root: bool) {
        if is_root {
            let _ = writeln!(out, "{}", self.label());
        } else {
            let connector = if is_last { "└── " } else { "├── " };
            let _ = writeln!(out, "{prefix}{connector}{}", self.label());
        }

        let child_prefix = if is_root {
            String::new()
        } else {
            format!("{prefix}{}", if is_last { "    " } else { "\u{2502}   " })
        };

        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_into(out, &child_prefix, i == count - 1, false);
        }
    }

    fn label(&self) -> String {
        match &self.token {
            Some(token) => format!("{} ({})", self.name, token.lexeme),
            None => self.name.clone(),
        }
    }
}
