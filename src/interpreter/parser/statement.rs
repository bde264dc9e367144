use std::iter::Peekable;

use crate::{
    ast::{Expr, Mutability, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::compound_assignment_operator,
            block::parse_block,
            core::{ParseResult, parse_expression, parse_if},
            desugar::{ForLoop, desugar_compound_assignment, desugar_for},
            utils::{advance, expect, parse_identifier, peek},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `let` or `const` declaration,
/// - an `if`, `while` or `for` statement,
/// - `return`, `break` or `continue`,
/// - a braced block,
/// - an assignment, compound assignment or expression statement.
///
/// Simple statements end with `;`. The statement's position is taken from its
/// first token.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let statement = match peek(tokens) {
        (Token::If, _) => return parse_if(tokens),
        (Token::While, _) => return parse_while(tokens),
        (Token::For, _) => return parse_for(tokens),
        (Token::LBrace, _) => {
            let (statements, pos) = parse_block(tokens)?;
            return Ok(Statement::Block { statements, pos });
        },
        (Token::Return, _) => return parse_return(tokens),
        (Token::Break, pos) => {
            tokens.next();
            Statement::Break { pos }
        },
        (Token::Continue, pos) => {
            tokens.next();
            Statement::Continue { pos }
        },
        _ => parse_simple_statement(tokens)?,
    };

    expect(tokens, &Token::Semicolon)?;
    Ok(statement)
}

/// Parses a declaration, assignment or expression without its trailing `;`.
///
/// These are the forms allowed in a `for` header as well as in statement
/// position.
fn parse_simple_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match peek(tokens) {
        (Token::Let | Token::Const, _) => parse_declaration(tokens),
        _ => parse_assignment_or_expression(tokens),
    }
}

/// Parses `let name = expr` or `const name = expr`.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (keyword, _) = advance(tokens, "'let' or 'const'")?;
    let mutability = if *keyword == Token::Const {
        Mutability::Const
    } else {
        Mutability::Mutable
    };

    let (name, pos) = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Let { name,
                        value,
                        mutability,
                        pos })
}

/// Parses an expression and, if an assignment operator follows, turns it
/// into an assignment.
///
/// Reading the target as an expression first keeps the lookahead to a single
/// token. Compound assignments are desugared on the spot.
///
/// # Errors
/// `InvalidAssignmentTarget` when the left side is not a plain name.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (_, pos) = peek(tokens);
    let target = parse_expression(tokens)?;

    let (token, op_pos) = peek(tokens);
    let compound = match token {
        Token::Equals => None,
        other => match compound_assignment_operator(other) {
            Some(op) => Some(op),
            None => return Ok(Statement::Expression { expr: target,
                                                      pos }),
        },
    };
    tokens.next();

    let Expr::Identifier { name, pos: name_pos } = target else {
        return Err(ParseError::InvalidAssignmentTarget { pos: op_pos });
    };
    let value = parse_expression(tokens)?;

    Ok(match compound {
        Some(op) => desugar_compound_assignment(name, op, value, name_pos, op_pos),
        None => Statement::Assign { name,
                                    value,
                                    pos: name_pos },
    })
}

/// Parses `return;` or `return expr;`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::Return)?;
    let value = match peek(tokens) {
        (Token::Semicolon, _) => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, &Token::Semicolon)?;
    Ok(Statement::Return { value, pos })
}

/// Parses `while (condition) { body }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::While)?;
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    let (body, _) = parse_block(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          pos })
}

/// Parses `for (init; condition; update) { body }` and desugars it.
///
/// The initializer must be a declaration, an assignment or an increment; the
/// update must be an assignment or an increment. See
/// [`desugar_for`] for the generated shape.
///
/// # Errors
/// `InvalidForInitializer`, `InvalidForUpdate`, `ExpectedBlock`, plus any
/// error from the header's expressions.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::For)?;
    expect(tokens, &Token::LParen)?;

    let init = parse_simple_statement(tokens)?;
    if !matches!(init, Statement::Let { .. } | Statement::Assign { .. }) && !is_update(&init) {
        return Err(ParseError::InvalidForInitializer { pos: init.position() });
    }
    expect(tokens, &Token::Semicolon)?;

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    let update = parse_assignment_or_expression(tokens)?;
    if !matches!(update, Statement::Assign { .. }) && !is_update(&update) {
        return Err(ParseError::InvalidForUpdate { pos: update.position() });
    }
    expect(tokens, &Token::RParen)?;

    let (body, body_pos) = parse_block(tokens)?;

    Ok(desugar_for(ForLoop { init,
                             condition,
                             update,
                             body,
                             pos,
                             body_pos }))
}

/// `true` for an expression statement that is a bare `++`/`--`.
fn is_update(statement: &Statement) -> bool {
    matches!(statement,
             Statement::Expression { expr: Expr::Unary { op, .. }, .. } if op.is_update())
}
