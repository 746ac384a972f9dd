//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry point.
//! Operands are dispatched through a NUD (null denotation) lookup keyed by
//! token kind; binary operators are folded by precedence climbing in
//! [`super::expr`].

use std::collections::HashMap;

use crate::{
    ast::ast::ExprWrapper,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{create_token_lookups, NUDHandler, NUDLookup},
};

/// Deepest nesting of groups, lists, calls, prefix operators and operator
/// chains the parser accepts. Bounds the recursion of parsing, evaluation and
/// dropping of the tree.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// The token list always ends with an EOF token and the cursor never moves
/// past it.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for null denotation (operand) handlers
    nud_lookup: NUDLookup,
    /// Nesting level of the expression being parsed
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance, appending an EOF token if `tokens`
    /// does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.kind != TokenKind::EOF) {
            let end = tokens.last().map_or(Position::default(), |token| token.span.end);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::new(),
                Span { start: end, end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            nud_lookup: HashMap::new(),
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let previous = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[previous]
    }

    /// Consumes the closing bracket `closer`, or fails describing what was
    /// found instead.
    pub fn expect_bracket(&mut self, closer: &str) -> Result<Token, Error> {
        if self.current_token().is(TokenKind::Bracket, &[closer]) {
            return Ok(self.advance().clone());
        }

        let token = self.current_token();
        Err(ErrorImpl::UnexpectedTokenDetailed {
            token: token.describe(),
            message: format!("expected `{}`", closer),
        }
        .at(token.span.start))
    }

    /// Enters one nesting level, failing once [`MAX_NESTING_DEPTH`] is
    /// reached.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }
            .at(self.get_position()));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` nesting levels entered with [`Parser::descend`].
    pub fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Error for a current token that cannot start or continue an expression.
    pub fn unexpected_token(&self) -> Error {
        let token = self.current_token();
        ErrorImpl::UnexpectedToken {
            token: token.describe(),
        }
        .at(token.span.start)
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a null denotation (operand) handler for a token kind.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }
}

/// Parses a stream of tokens into a single expression tree.
///
/// Fails on an empty stream and when tokens remain after one complete
/// expression.
pub fn parse(tokens: Vec<Token>) -> Result<ExprWrapper, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    if parser.current_token_kind() == TokenKind::EOF {
        return Err(ErrorImpl::EmptyExpression.at(parser.get_position()));
    }

    let expr = parse_expr(&mut parser)?;

    if parser.current_token_kind() != TokenKind::EOF {
        let token = parser.current_token();
        return Err(ErrorImpl::TrailingInput {
            token: token.describe(),
        }
        .at(token.span.start));
    }

    tracing::debug!(tokens = parser.tokens.len(), ast = ?expr, "parsed expression");

    Ok(expr)
}
