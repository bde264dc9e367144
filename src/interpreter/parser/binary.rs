use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator, Position},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
///
/// # Returns
/// An `Expr::Logical` tree, or the operand itself when no `||` follows.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut left = parse_logical_and(tokens)?;
    while let Some((Token::OrOr, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::Or,
                               right: Box::new(right),
                               pos };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut left = parse_equality(tokens)?;
    while let Some((Token::AndAnd, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let right = parse_equality(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::And,
                               right: Box::new(right),
                               pos };
    }
    Ok(left)
}

/// Parses equality comparisons.
///
/// Handles left-associative binary operators: `==` and `!=`.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    parse_level(tokens,
                &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                parse_relational)
}

/// Parses ordering comparisons.
///
/// Handles left-associative binary operators: `<`, `>`, `<=` and `>=`.
///
/// The rule is: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    parse_level(tokens,
                &[BinaryOperator::Less,
                  BinaryOperator::Greater,
                  BinaryOperator::LessEqual,
                  BinaryOperator::GreaterEqual],
                parse_additive)
}

/// Parses addition, subtraction and division.
///
/// Division binds at this level, not with `*` and `%`: `8 / 2 * 2` is
/// `8 / (2 * 2)` and `1 + 6 / 2` is `(1 + 6) / 2`.
///
/// The rule is: `additive := multiplicative (("+" | "-" | "/") multiplicative)*`
///
/// # Returns
/// An `Expr::Binary` tree, left-associative.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    parse_level(tokens,
                &[BinaryOperator::Add, BinaryOperator::Sub, BinaryOperator::Div],
                parse_multiplicative)
}

/// Parses multiplication and remainder.
///
/// The rule is: `multiplicative := unary (("*" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    parse_level(tokens, &[BinaryOperator::Mul, BinaryOperator::Mod], parse_unary)
}

/// Folds one left-associative precedence level.
///
/// Keeps consuming operators from `operators` and operands from `next` until
/// the next token is not one of this level's operators.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      operators: &[BinaryOperator],
                      next: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut left = next(tokens)?;
    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            let pos = *pos;
            tokens.next();
            let right = next(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its binary operator, if it is one.
///
/// # Example
/// ```
/// use linger::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Slash), Some(BinaryOperator::Div));
/// assert_eq!(token_to_binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Maps a compound assignment token to the operator it applies.
#[must_use]
pub const fn compound_assignment_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Sub),
        Token::StarAssign => Some(BinaryOperator::Mul),
        Token::SlashAssign => Some(BinaryOperator::Div),
        Token::PercentAssign => Some(BinaryOperator::Mod),
        _ => None,
    }
}
