use std::{collections::HashSet, iter::Peekable, rc::Rc};

use tracing::trace;

use crate::{
    ast::{FunctionDef, Position, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::ParseResult,
            utils::{expect, parse_identifier, parse_parameters, peek, unexpected},
        },
    },
};

/// Parses a sequence of `proc` definitions up to the end of input.
///
/// Procedure names are recorded as they are read, so a repeated name fails
/// right at the second definition, before its parameters or body are looked
/// at.
///
/// # Errors
/// `DuplicateProcedure` for a repeated name, `UnexpectedToken` for anything
/// at the top level other than `proc`, plus every error of the definitions
/// themselves.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut defined = HashSet::new();
    let mut procedures = Vec::new();

    loop {
        match peek(tokens) {
            (Token::Eof, _) => break,
            (Token::Proc, _) => {
                let def = parse_procedure(tokens, &mut defined)?;
                procedures.push(Rc::new(def));
            },
            (token, pos) => return Err(unexpected(token, pos, "'proc'")),
        }
    }

    Ok(Program { procedures })
}

/// Parses `proc name(params) { body }`.
fn parse_procedure<'a, I>(tokens: &mut Peekable<I>,
                          defined: &mut HashSet<String>)
                          -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let pos = expect(tokens, &Token::Proc)?;
    let (name, name_pos) = parse_identifier(tokens)?;
    if !defined.insert(name.clone()) {
        return Err(ParseError::DuplicateProcedure { name,
                                                    pos: name_pos });
    }

    let params = parse_parameters(tokens)?;
    let (body, _) = parse_block(tokens)?;

    trace!(procedure = %name, params = params.len(), "parsed procedure");

    Ok(FunctionDef { name,
                     params,
                     body,
                     pos })
}
