use std::iter::Peekable;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

static END_OF_INPUT: Token = Token::Eof;

/// Builds the error for finding `found` where `expected` was required.
///
/// Running into [`Token::Eof`] is reported as an unexpected end of input
/// rather than as an unexpected token.
pub(in crate::interpreter::parser) fn unexpected(found: &Token,
                                                 pos: Position,
                                                 expected: &str)
                                                 -> ParseError {
    match found {
        Token::Eof => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                         pos },
        _ => ParseError::UnexpectedToken { found: found.to_string(),
                                           expected: expected.to_string(),
                                           pos },
    }
}

/// Returns the next token and its position without consuming it.
///
/// A stream that runs dry without an explicit [`Token::Eof`] behaves as if it
/// ended with one.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> (&'a Token, Position)
    where I: Iterator<Item = &'a (Token, Position)>
{
    tokens.peek()
          .copied()
          .map_or((&END_OF_INPUT, Position::default()), |(token, pos)| (token, *pos))
}

/// Consumes the next token, failing at the end of input.
pub(in crate::interpreter::parser) fn advance<'a, I>(tokens: &mut Peekable<I>,
                                                     expected: &str)
                                                     -> ParseResult<(&'a Token, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Eof, pos)) => {
            Err(ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                   pos:      *pos, })
        },
        Some((token, pos)) => Ok((token, *pos)),
        None => Err(ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                       pos:      Position::default(), }),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let description = expected.to_string();
    let (found, pos) = advance(tokens, &description)?;
    if found == expected {
        Ok(pos)
    } else {
        Err(unexpected(found, pos, &description))
    }
}

/// Consumes the next token if it equals `token`.
pub(in crate::interpreter::parser) fn consume_if<'a, I>(tokens: &mut Peekable<I>,
                                                        token: &Token)
                                                        -> Option<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.peek() {
        Some((found, pos)) if found == token => {
            let pos = *pos;
            tokens.next();
            Some(pos)
        },
        _ => None,
    }
}

/// Parses a comma-separated list up to and including the closing `)`.
///
/// The opening `(` must already be consumed. An immediate `)` yields an empty
/// list.
///
/// Grammar (simplified): `list := ")" | item ("," item)* ")"`
///
/// # Errors
/// - `TrailingComma` if a `,` is directly followed by `)`.
/// - `UnexpectedToken` / `UnexpectedEndOfInput` if the list is not closed.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut items = Vec::new();
    if consume_if(tokens, &Token::RParen).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        let (found, pos) = advance(tokens, "',' or ')'")?;
        match found {
            Token::RParen => break,
            Token::Comma => {
                if let (Token::RParen, _) = peek(tokens) {
                    return Err(ParseError::TrailingComma { pos });
                }
            },
            _ => return Err(unexpected(found, pos, "',' or ')'")),
        }
    }
    Ok(items)
}

/// Parses an identifier where a name is required.
///
/// A reserved word in this position is reported as
/// [`ParseError::KeywordAsIdentifier`].
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let (found, pos) = advance(tokens, "identifier")?;
    match found {
        Token::Identifier(name) => Ok((name.clone(), pos)),
        _ => Err(found.keyword().map_or_else(|| unexpected(found, pos, "identifier"),
                                             |keyword| ParseError::KeywordAsIdentifier {
                                                 keyword: keyword.to_string(),
                                                 pos,
                                             })),
    }
}

/// Parses a parenthesized parameter list, `(a, b, c)`.
///
/// # Errors
/// `DuplicateParameter` when a name repeats, plus every error of
/// [`parse_comma_separated`] and [`parse_identifier`].
pub(in crate::interpreter::parser) fn parse_parameters<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, Position)>
{
    expect(tokens, &Token::LParen)?;
    let named = parse_comma_separated(tokens, parse_identifier)?;

    let mut params: Vec<String> = Vec::with_capacity(named.len());
    for (name, pos) in named {
        if params.contains(&name) {
            return Err(ParseError::DuplicateParameter { name, pos });
        }
        params.push(name);
    }
    Ok(params)
}
