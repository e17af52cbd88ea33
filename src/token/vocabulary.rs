use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::kind::TokenKind;

/// An anchored longest-match rule: given the full source as a `char` slice
/// and an offset into it, return how many characters (not bytes) the rule
/// consumes starting at that offset, or `None` if it does not match there.
pub type Matcher = fn(&[char], usize) -> Option<usize>;

pub struct PatternEntry {
    pub name: &'static str,
    pub matcher: Matcher,
}

fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_id_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn match_comment(src: &[char], pos: usize) -> Option<usize> {
    if src.get(pos) == Some(&'-') && src.get(pos + 1) == Some(&'-') {
        let mut len = 2;
        while src.get(pos + len).map_or(false, |c| *c != '\n') {
            len += 1;
        }
        Some(len)
    } else {
        None
    }
}

fn match_whitespace(src: &[char], pos: usize) -> Option<usize> {
    let mut len = 0;
    while matches!(src.get(pos + len), Some(' ' | '\t' | '\r' | '\n')) {
        len += 1;
    }
    (len > 0).then_some(len)
}

fn match_concat(src: &[char], pos: usize) -> Option<usize> {
    (src.get(pos) == Some(&'&')).then_some(1)
}

/// String literal: `"` then any run of non-quote/non-newline chars or doubled
/// quotes, ending at the first lone `"`, a newline, or end of input. The
/// unterminated-vs-terminated distinction is resolved by the caller (§4.3
/// step 5); this matcher only finds the longest run the grammar allows.
fn match_literal(src: &[char], pos: usize) -> Option<usize> {
    if src.get(pos) != Some(&'"') {
        return None;
    }
    let mut len = 1;
    loop {
        match src.get(pos + len) {
            Some('"') if src.get(pos + len + 1) == Some(&'"') => len += 2,
            Some('"') => {
                len += 1;
                break;
            }
            Some(c) if *c != '\n' => len += 1,
            _ => break,
        }
    }
    Some(len)
}

fn match_char_literal(src: &[char], pos: usize) -> Option<usize> {
    if src.get(pos) != Some(&'\'') {
        return None;
    }
    match (src.get(pos + 1), src.get(pos + 2)) {
        (Some('\''), Some('\'')) if src.get(pos + 3) == Some(&'\'') => Some(4),
        (Some(c), Some('\'')) if *c != '\n' => Some(3),
        (Some(c), _) if *c != '\n' => Some(2),
        _ => Some(1),
    }
}

fn match_real(src: &[char], pos: usize) -> Option<usize> {
    let mut len = 0;
    while src.get(pos + len).map_or(false, |c| c.is_ascii_digit()) {
        len += 1;
    }
    if len == 0 || src.get(pos + len) != Some(&'.') {
        return None;
    }
    let dot = len;
    let mut frac = 0;
    while src
        .get(pos + dot + 1 + frac)
        .map_or(false, |c| c.is_ascii_digit())
    {
        frac += 1;
    }
    (frac > 0).then_some(dot + 1 + frac)
}

fn match_num(src: &[char], pos: usize) -> Option<usize> {
    let mut len = 0;
    while src.get(pos + len).map_or(false, |c| c.is_ascii_digit()) {
        len += 1;
    }
    (len > 0).then_some(len)
}

fn match_id(src: &[char], pos: usize) -> Option<usize> {
    if !src.get(pos).map_or(false, |c| is_id_start(*c)) {
        return None;
    }
    let mut len = 1;
    while src.get(pos + len).map_or(false, |c| is_id_continue(*c)) {
        len += 1;
    }
    Some(len)
}

fn match_assign(src: &[char], pos: usize) -> Option<usize> {
    (src.get(pos) == Some(&':') && src.get(pos + 1) == Some(&'=')).then_some(2)
}

fn match_relop(src: &[char], pos: usize) -> Option<usize> {
    let two = (src.get(pos).copied(), src.get(pos + 1).copied());
    match two {
        (Some('<'), Some('=')) | (Some('>'), Some('=')) | (Some('/'), Some('=')) => Some(2),
        (Some('='), _) | (Some('<'), _) | (Some('>'), _) => Some(1),
        _ => None,
    }
}

fn word_at(src: &[char], pos: usize, word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if src.len() < pos + chars.len() {
        return false;
    }
    let boundary_before = pos == 0 || !is_id_continue(src[pos - 1]);
    let boundary_after = !src
        .get(pos + chars.len())
        .map_or(false, |c| is_id_continue(*c));
    boundary_before
        && boundary_after
        && src[pos..pos + chars.len()]
            .iter()
            .zip(chars.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn match_addop(src: &[char], pos: usize) -> Option<usize> {
    match src.get(pos) {
        Some('+') | Some('-') => Some(1),
        _ if word_at(src, pos, "or") => Some(2),
        _ => None,
    }
}

fn match_mulop(src: &[char], pos: usize) -> Option<usize> {
    match src.get(pos) {
        Some('*') | Some('/') => Some(1),
        _ if word_at(src, pos, "rem") => Some(3),
        _ if word_at(src, pos, "mod") => Some(3),
        _ if word_at(src, pos, "and") => Some(3),
        _ => None,
    }
}

macro_rules! single_char {
    ($name:ident, $ch:expr) => {
        fn $name(src: &[char], pos: usize) -> Option<usize> {
            (src.get(pos) == Some(&$ch)).then_some(1)
        }
    };
}

single_char!(match_lparen, '(');
single_char!(match_rparen, ')');
single_char!(match_comma, ',');
single_char!(match_colon, ':');
single_char!(match_semicolon, ';');
single_char!(match_dot, '.');

/// The longest-match pattern table, in priority order. Order is semantically
/// load-bearing: `REAL` precedes `NUM`, `ASSIGN` precedes `COLON`,
/// `LITERAL`/`CHAR_LITERAL` precede anything quote-touching, and — since the
/// `or`/`and`/`rem`/`mod` spellings are deliberately absent from the reserved
/// map — `ADDOP`/`MULOP` precede `ID` so those four words are classified as
/// operators rather than falling through to a plain identifier token.
const PATTERN_TABLE: &[PatternEntry] = &[
    PatternEntry { name: "COMMENT", matcher: match_comment },
    PatternEntry { name: "WHITESPACE", matcher: match_whitespace },
    PatternEntry { name: "CONCAT", matcher: match_concat },
    PatternEntry { name: "LITERAL", matcher: match_literal },
    PatternEntry { name: "CHAR_LITERAL", matcher: match_char_literal },
    PatternEntry { name: "REAL", matcher: match_real },
    PatternEntry { name: "NUM", matcher: match_num },
    PatternEntry { name: "ASSIGN", matcher: match_assign },
    PatternEntry { name: "RELOP", matcher: match_relop },
    PatternEntry { name: "ADDOP", matcher: match_addop },
    PatternEntry { name: "MULOP", matcher: match_mulop },
    PatternEntry { name: "ID", matcher: match_id },
    PatternEntry { name: "LPAREN", matcher: match_lparen },
    PatternEntry { name: "RPAREN", matcher: match_rparen },
    PatternEntry { name: "COMMA", matcher: match_comma },
    PatternEntry { name: "COLON", matcher: match_colon },
    PatternEntry { name: "SEMICOLON", matcher: match_semicolon },
    PatternEntry { name: "DOT", matcher: match_dot },
];

macro_rules! reserved {
    ($map:ident, $($word:expr => $kind:ident),+ $(,)?) => {
        $( $map.insert($word, TokenKind::$kind); )+
    };
}

static RESERVED_WORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    reserved! { m,
        "PROCEDURE" => Procedure, "MODULE" => Module, "IS" => Is,
        "BEGIN" => Begin, "END" => End, "IF" => If, "THEN" => Then,
        "ELSE" => Else, "ELSIF" => Elsif, "WHILE" => While, "LOOP" => Loop,
        "FLOAT" => Float, "GET" => Get, "PUT" => Put,
        "IN" => In, "OUT" => Out, "INOUT" => Inout,
        "INTEGER" => IntegerT, "REAL" => RealT, "CHAR" => CharT,
        "CONSTANT" => Const,
        "ABORT" => Abort, "ABS" => Abs, "ABSTRACT" => Abstract,
        "ACCEPT" => Accept, "ACCESS" => Access, "ALIASED" => Aliased,
        "ALL" => All, "ARRAY" => Array, "AT" => At, "BODY" => Body,
        "CASE" => Case, "DECLARE" => Declare, "DELAY" => Delay,
        "DELTA" => Delta, "DIGITS" => Digits, "DO" => Do, "ENTRY" => Entry,
        "EXCEPTION" => Exception, "EXIT" => Exit, "FOR" => For,
        "FUNCTION" => Function, "GENERIC" => Generic, "GOTO" => Goto,
        "INTERFACE" => Interface, "LIMITED" => Limited, "NEW" => New,
        "NOT" => Not, "NULL" => Null, "OF" => Of, "OTHERS" => Others,
        "OVERRIDING" => Overriding, "PACKAGE" => Package,
        "PARALLEL" => Parallel, "PRAGMA" => Pragma, "PRIVATE" => Private,
        "PROTECTED" => Protected, "RAISE" => Raise, "RANGE" => Range,
        "RECORD" => Record, "RENAMES" => Renames, "REQUEUE" => Requeue,
        "RETURN" => Return, "REVERSE" => Reverse, "SELECT" => Select,
        "SEPARATE" => Separate, "SOME" => Some, "SUBTYPE" => Subtype,
        "SYNCHRONIZED" => Synchronized, "TAGGED" => Tagged, "TASK" => Task,
        "TERMINATE" => Terminate, "TYPE" => Type, "UNTIL" => Until,
        "USE" => Use, "WHEN" => When, "WITH" => With, "XOR" => Xor,
    };
    m
});

/// Owns the reserved-word map and the pattern table; shared read-only by the
/// scanner and the parser so reserved-word resolution is always consistent
/// between the two phases (§2).
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenVocabulary;

impl TokenVocabulary {
    pub fn new() -> Self {
        Self
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        RESERVED_WORDS.contains_key(word.to_ascii_uppercase().as_str())
    }

    pub fn reserved_kind(&self, word: &str) -> Option<TokenKind> {
        RESERVED_WORDS.get(word.to_ascii_uppercase().as_str()).copied()
    }

    pub fn pattern_table(&self) -> &'static [PatternEntry] {
        PATTERN_TABLE
    }

    pub fn comment_matcher(&self) -> Matcher {
        match_comment
    }

    pub fn whitespace_matcher(&self) -> Matcher {
        match_whitespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_lookup_is_case_insensitive() {
        let vocab = TokenVocabulary::new();
        assert!(vocab.is_reserved("procedure"));
        assert!(vocab.is_reserved("Procedure"));
        assert_eq!(vocab.reserved_kind("integer"), Some(TokenKind::IntegerT));
        assert!(!vocab.is_reserved("frobnicate"));
    }

    #[test]
    fn operator_keywords_are_not_reserved() {
        let vocab = TokenVocabulary::new();
        for word in ["or", "and", "rem", "mod"] {
            assert!(!vocab.is_reserved(word), "{word} must not be reserved");
        }
    }

    #[test]
    fn real_precedes_num_in_priority() {
        let src: Vec<char> = "3.14".chars().collect();
        assert_eq!(match_real(&src, 0), Some(4));
    }

    #[test]
    fn assign_precedes_colon() {
        let src: Vec<char> = ":=".chars().collect();
        assert_eq!(match_assign(&src, 0), Some(2));
    }
}
