use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Identifiers with a special meaning, keyed by their lowercased text.
    ///
    /// Each entry gives the kind and the normalized text of the emitted token.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, (TokenKind, &'static str)> = {
        let mut map = HashMap::new();
        map.insert("t", (TokenKind::Boolean, "true"));
        map.insert("true", (TokenKind::Boolean, "true"));
        map.insert("f", (TokenKind::Boolean, "false"));
        map.insert("false", (TokenKind::Boolean, "false"));
        map.insert("and", (TokenKind::Operator, "&&"));
        map.insert("or", (TokenKind::Operator, "||"));
        map.insert("eq", (TokenKind::Operator, "=="));
        map.insert("ne", (TokenKind::Operator, "!="));
        map.insert("le", (TokenKind::Operator, "<="));
        map.insert("ge", (TokenKind::Operator, ">="));
        map.insert("lt", (TokenKind::Operator, "<"));
        map.insert("gt", (TokenKind::Operator, ">"));
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Integer,
    Float,
    Char,
    String,
    Boolean,
    Operator,
    Bracket,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({:?})", self.kind, self.value)
        }
    }
}

impl Token {
    /// Checks the kind and, when `values` is non-empty, that the text is one
    /// of `values`.
    pub fn is(&self, kind: TokenKind, values: &[&str]) -> bool {
        self.kind == kind && (values.is_empty() || values.contains(&self.value.as_str()))
    }

    /// Human readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier {}", self.value),
            TokenKind::Integer | TokenKind::Float => format!("number {}", self.value),
            TokenKind::Boolean => format!("bool {}", self.value),
            TokenKind::Char | TokenKind::String => format!("string {:?}", self.value),
            TokenKind::Operator => format!("operator {}", self.value),
            TokenKind::Bracket => format!("bracket {}", self.value),
            TokenKind::EOF => String::from("end of input"),
        }
    }
}
