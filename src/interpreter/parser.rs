use tracing::debug;

use crate::{
    ast::{Position, Program},
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Expression entry point, `if` statements and the result alias.
pub mod core;

/// Left-associative binary levels, from `||` down to `*` and `%`.
///
/// Each level loops over its own operators and delegates operands to the next
/// tighter level.
pub mod binary;

/// Prefix and postfix operators, calls, and terminal expressions.
pub mod unary;

/// Statement parsing: declarations, assignments, loops, `return`, `break`
/// and `continue`.
pub mod statement;

/// Braced statement lists.
pub mod block;

/// Top-level `proc` definitions and the duplicate-name check.
pub mod procedure;

/// Syntax-to-syntax rewrites applied while parsing.
///
/// `for` loops and compound assignments never reach the evaluator; these
/// helpers build their plain equivalents. `else if` chains are nested by
/// [`core::parse_if`] directly.
pub mod desugar;

/// Shared helpers for consuming expected tokens and comma-separated lists.
pub mod utils;

/// Parses a whole token stream into a [`Program`].
///
/// The stream is consumed once, left to right, and parsing stops at the first
/// error.
///
/// # Errors
/// Returns the first [`crate::error::ParseError`] encountered.
pub fn parse(tokens: &[(Token, Position)]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let program = procedure::parse_program(&mut iter)?;

    debug!(procedures = program.procedures.len(), "parsed program");

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Expr, Statement},
        error::ParseErrorKind,
        interpreter::lexer::tokenize,
    };

    fn body_of(source: &str) -> Vec<Statement> {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        program.procedures[0].body.clone()
    }

    #[test]
    fn else_if_nests_a_single_if_in_the_else_branch() {
        let body = body_of("proc main() { if (a) { } else if (b) { } else { return; } }");
        let Statement::If { else_branch: Some(else_branch), .. } = &body[0] else {
            panic!("expected an if with an else branch");
        };
        assert_eq!(else_branch.len(), 1);
        let Statement::If { else_branch: Some(innermost), .. } = &else_branch[0] else {
            panic!("expected a nested if");
        };
        assert!(matches!(innermost[..], [Statement::Return { .. }]));
    }

    #[test]
    fn indices_and_calls_chain_left_to_right() {
        let body = body_of("proc main() { f(1)[2](3); }");
        let Statement::Expression { expr: Expr::Call { callee, .. }, .. } = &body[0] else {
            panic!("expected a call statement");
        };
        let Expr::Index { target, .. } = callee.as_ref() else {
            panic!("expected an index");
        };
        assert!(matches!(target.as_ref(), Expr::Call { .. }));
    }

    #[test]
    fn keyword_in_expression_position_is_unexpected() {
        let tokens = tokenize("proc main() { let x = else; }").unwrap();
        assert_eq!(parse(&tokens).unwrap_err().kind(), ParseErrorKind::UnexpectedToken);
    }
}
