use std::iter::Peekable;

use crate::{
    ast::{Expr, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            block::parse_block,
            utils::{consume_if, expect, peek},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    parse_logical_or(tokens)
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if (<condition>) { ... }
///     else if (<condition>) { ... }
///     else { ... }
/// ```
/// An `else if` is parsed recursively and stored as the sole statement of the
/// outer `else` branch, so the result only ever contains two-armed `If`s.
///
/// # Errors
/// - `UnexpectedToken` if the parentheses around the condition are missing.
/// - `ExpectedBlock` if a branch is not braced.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::If)?;
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;

    let (then_branch, _) = parse_block(tokens)?;

    let else_branch = if consume_if(tokens, &Token::Else).is_some() {
        match peek(tokens) {
            (Token::If, _) => Some(vec![parse_if(tokens)?]),
            _ => Some(parse_block(tokens)?.0),
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       pos })
}
