use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, LiteralValue, Position, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{advance, expect, parse_comma_separated, parse_parameters, peek, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
/// - `++` / `--` (increment or decrement a variable, yielding the new value)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "++" | "--") unary
///            | primary postfix*
/// ```
///
/// # Errors
/// `InvalidIncrementTarget` when `++`/`--` is applied to anything but a name.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (token, pos) = peek(tokens);
    let op = match token {
        Token::Minus => UnaryOperator::Negate,
        Token::Bang => UnaryOperator::Not,
        Token::PlusPlus => UnaryOperator::PreIncrement,
        Token::MinusMinus => UnaryOperator::PreDecrement,
        _ => {
            let primary = parse_primary(tokens)?;
            return parse_postfix(tokens, primary);
        },
    };
    tokens.next();

    let operand = parse_unary(tokens)?;
    if op.is_update() && !matches!(operand, Expr::Identifier { .. }) {
        return Err(ParseError::InvalidIncrementTarget { pos });
    }

    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     pos })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals, and `nil`
/// - identifiers
/// - parenthesized expressions
/// - lambda literals
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "lam" parameters "->" block
/// ```
///
/// # Errors
/// `UnexpectedToken` for anything that cannot start an expression, reserved
/// words included.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match peek(tokens) {
        (Token::Int(..) | Token::Float(..) | Token::Str(..) | Token::Bool(..) | Token::Nil, _) => {
            parse_literal(tokens)
        },
        (Token::Identifier(name), pos) => {
            tokens.next();
            Ok(Expr::Identifier { name: name.clone(),
                                  pos })
        },
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Lam, _) => parse_lambda(tokens),
        (token, pos) => Err(unexpected(token, pos, "expression")),
    }
}

/// Applies calls, indexing and postfix increments to an expression.
///
/// Calls and indices chain without limit and mix freely, so `f(1)(2)` is a
/// call of a call and `rows(0)[1][2]` indexes the result of a call twice.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "(" arguments ")"
///              | postfix "[" expression "]"
///              | identifier ("++" | "--")
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    loop {
        match peek(tokens) {
            (Token::LParen, pos) => {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression)?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    pos };
            },
            (Token::LBracket, pos) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket)?;
                node = Expr::Index { target: Box::new(node),
                                     index: Box::new(index),
                                     pos };
            },
            (Token::PlusPlus | Token::MinusMinus, pos) => {
                if !matches!(node, Expr::Identifier { .. }) {
                    return Err(ParseError::InvalidIncrementTarget { pos });
                }
                let op = if let (Token::PlusPlus, _) = peek(tokens) {
                    UnaryOperator::PostIncrement
                } else {
                    UnaryOperator::PostDecrement
                };
                tokens.next();
                return Ok(Expr::Unary { op,
                                        operand: Box::new(node),
                                        pos });
            },
            _ => return Ok(node),
        }
    }
}

/// Parses a number, string, boolean or `nil` literal.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (token, pos) = advance(tokens, "literal")?;
    let value = match token {
        Token::Int(v) => LiteralValue::Int(*v),
        Token::Float(v) => LiteralValue::Float(*v),
        Token::Str(s) => LiteralValue::Str(s.clone()),
        Token::Bool(b) => LiteralValue::Bool(*b),
        Token::Nil => LiteralValue::Nil,
        other => return Err(unexpected(other, pos, "literal")),
    };
    Ok(Expr::Literal { value, pos })
}

/// Parses a parenthesized expression, `( expression )`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    expect(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    Ok(expr)
}

/// Parses a lambda literal, `lam(x, y) -> { ... }`.
///
/// The body is a block; the resulting closure captures the scope active where
/// the literal is evaluated.
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::Lam)?;
    let params = parse_parameters(tokens)?;
    expect(tokens, &Token::Arrow)?;
    let (body, _) = parse_block(tokens)?;

    let def = FunctionDef { name: FunctionDef::LAMBDA_NAME.to_string(),
                            params,
                            body,
                            pos };
    Ok(Expr::Lambda { def: Rc::new(def),
                      pos })
}
