use std::iter::Peekable;

use crate::{
    ast::{Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{advance, peek},
        },
    },
};

/// Parses a block delimited by braces.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Returns
/// The statements and the position of the opening brace.
///
/// # Errors
/// `ExpectedBlock` when the next token is not `{`, and
/// `UnexpectedEndOfInput` when the closing `}` never arrives.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Vec<Statement>, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (found, pos) = advance(tokens, "'{'")?;
    if *found != Token::LBrace {
        return Err(ParseError::ExpectedBlock { found: found.to_string(),
                                               pos });
    }

    let mut statements = Vec::new();
    loop {
        match peek(tokens) {
            (Token::RBrace, _) => {
                tokens.next();
                break;
            },
            (Token::Eof, eof) => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string(),
                                                              pos:      eof, });
            },
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok((statements, pos))
}
