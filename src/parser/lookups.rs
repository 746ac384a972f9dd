use std::collections::HashMap;

use crate::{
    ast::ast::ExprWrapper,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::*, parser::Parser};

/// Binary operator precedence, loosest first.
///
/// `Default` marks tokens that do not continue a binary expression.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Membership,
}

impl BindingPower {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Precedence of `token` when it follows a complete operand.
///
/// Only operator and identifier tokens are consulted, which is what lets the
/// identifiers `in` and `not_in` act as binary operators.
pub fn precedence(token: &Token) -> BindingPower {
    if !matches!(token.kind, TokenKind::Operator | TokenKind::Identifier) {
        return BindingPower::Default;
    }

    match token.value.as_str() {
        "in" | "not_in" => BindingPower::Membership,
        "*" | "/" | "%" => BindingPower::Multiplicative,
        "+" | "-" => BindingPower::Additive,
        "<" | "<=" | ">" | ">=" => BindingPower::Relational,
        "==" | "!=" => BindingPower::Equality,
        "&&" => BindingPower::LogicalAnd,
        "||" => BindingPower::LogicalOr,
        _ => BindingPower::Default,
    }
}

pub type NUDHandler = fn(&mut Parser) -> Result<ExprWrapper, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::Float, parse_float_expr);
    parser.nud(TokenKind::Boolean, parse_boolean_expr);
    parser.nud(TokenKind::Char, parse_string_expr);
    parser.nud(TokenKind::String, parse_string_expr);

    // Grouping and arrays
    parser.nud(TokenKind::Bracket, parse_bracket_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
