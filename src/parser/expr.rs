use crate::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{
            ArrayExpr, BinaryExpr, BooleanExpr, CallExpr, FloatExpr, IntegerExpr, PrefixExpr,
            StringExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::{
    lookups::{precedence, BindingPower},
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.descend()?;
    let expr = parse_binary_expr(parser, BindingPower::LogicalOr.rank())?;
    parser.ascend(1);

    Ok(expr)
}

/// Folds binary operators whose rank is at least `min_rank`.
///
/// The right side is parsed one rank tighter, so operators of equal rank
/// associate to the left. Every fold makes the tree one level deeper and
/// counts against the nesting limit.
pub fn parse_binary_expr(parser: &mut Parser, min_rank: u8) -> Result<ExprWrapper, Error> {
    let mut left = parse_unary_expr(parser)?;
    let mut folds = 0;

    loop {
        let rank = precedence(parser.current_token()).rank();
        if rank < min_rank {
            break;
        }

        parser.descend()?;
        folds += 1;

        let operator = parser.advance().clone();
        let right = parse_binary_expr(parser, rank + 1)?;

        left = ExprWrapper::new(BinaryExpr {
            span: Span {
                start: left.get_span().start,
                end: right.get_span().end,
            },
            left,
            operator,
            right,
        });
    }

    parser.ascend(folds);
    Ok(left)
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    if !parser
        .current_token()
        .is(TokenKind::Operator, &["+", "-", "!"])
    {
        return parse_primary_expr(parser);
    }

    parser.descend()?;
    let operator = parser.advance().clone();
    let right_expr = parse_unary_expr(parser)?;
    parser.ascend(1);

    Ok(ExprWrapper::new(PrefixExpr {
        span: Span {
            start: operator.span.start,
            end: right_expr.get_span().end,
        },
        operator,
        right_expr,
    }))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected_token()),
    }
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.advance().clone();

    if !parser.current_token().is(TokenKind::Bracket, &["("]) {
        return Ok(ExprWrapper::new(SymbolExpr {
            value: token.value,
            span: token.span,
        }));
    }

    parser.advance();
    let (arguments, end) = parse_list(parser, ")")?;

    Ok(ExprWrapper::new(CallExpr {
        name: token.value,
        arguments,
        span: Span {
            start: token.span.start,
            end,
        },
    }))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token();
    let value = token.value.parse::<i64>().map_err(|_| {
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        }
        .at(token.span.start)
    })?;

    Ok(ExprWrapper::new(IntegerExpr {
        value,
        span: parser.advance().span,
    }))
}

pub fn parse_float_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token();
    let value = token.value.parse::<f64>().map_err(|_| {
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        }
        .at(token.span.start)
    })?;

    Ok(ExprWrapper::new(FloatExpr {
        value,
        span: parser.advance().span,
    }))
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.advance();

    Ok(ExprWrapper::new(BooleanExpr {
        value: token.value == "true",
        span: token.span,
    }))
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.advance().clone();

    Ok(ExprWrapper::new(StringExpr {
        value: token.value,
        span: token.span,
    }))
}

pub fn parse_bracket_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    match parser.current_token().value.as_str() {
        "(" => parse_grouping_expr(parser),
        "[" => parse_array_expr(parser),
        _ => Err(parser.unexpected_token()),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.advance();
    let expr = parse_expr(parser)?;
    parser.expect_bracket(")")?;

    Ok(expr)
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.advance().span.start;
    let (elements, end) = parse_list(parser, "]")?;

    Ok(ExprWrapper::new(ArrayExpr {
        elements,
        span: Span { start, end },
    }))
}

/// Parses comma separated expressions up to and including `closer`.
///
/// Returns the items and the end position of the closing bracket.
fn parse_list(parser: &mut Parser, closer: &str) -> Result<(Vec<ExprWrapper>, Position), Error> {
    let mut items = vec![];

    if !parser.current_token().is(TokenKind::Bracket, &[closer]) {
        loop {
            items.push(parse_expr(parser)?);

            if !parser.current_token().is(TokenKind::Operator, &[","]) {
                break;
            }
            parser.advance();
        }
    }

    let close = parser.expect_bracket(closer)?;

    Ok((items, close.span.end))
}
