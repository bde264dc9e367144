//! # linger
//!
//! linger is a small procedural scripting language written in Rust.
//! Programs are sets of procedures with integers, floats, strings and
//! booleans, structured control flow, and first-class functions that close
//! over their defining scope.
//!
//! ```
//! let mut out = Vec::new();
//! linger::run_source("proc main() { println(\"hi\"); }", &mut out).unwrap();
//! assert_eq!(out, b"hi\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Program,
    config::Config,
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent source code as a tree. The AST is built by the parser and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to every node for error reporting.
pub mod ast;
/// Settings for running a program: the entry procedure and the call depth
/// limit.
pub mod config;
/// Provides the error types for parsing and evaluation.
///
/// Parse errors and runtime errors are separate families, each with a kind
/// enum for matching, a position, and a human-readable message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes of both phases.
/// - Attaches row and column for context.
/// - Implements `std::error::Error` for integration with callers.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scopes, values and evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

pub use error::Error;

/// Tokenizes and parses `source` into a program.
///
/// # Examples
/// ```
/// use linger::{error::ParseErrorKind, parse_source};
///
/// let program = parse_source("proc main() { return 1; }").unwrap();
/// assert!(program.procedure("main").is_some());
///
/// let err = parse_source("proc main() { return 1 }").unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}

/// Parses and runs `source` with the default configuration.
///
/// Builtins write to `output`. Returns the value returned by `main`.
///
/// # Examples
/// ```
/// use linger::{error::Error, interpreter::value::core::Value, run_source};
///
/// let mut out = Vec::new();
/// let value = run_source("proc main() { return 2 + 3 * 4; }", &mut out).unwrap();
/// assert_eq!(value, Value::Int(14));
///
/// // `x` is never declared
/// let err = run_source("proc main() { x = 1; }", &mut out).unwrap_err();
/// assert!(matches!(err, Error::Runtime(_)));
/// ```
pub fn run_source(source: &str, output: &mut dyn Write) -> Result<Value, Error> {
    run_source_with_config(source, Config::default(), output)
}

/// Parses and runs `source` with the given configuration.
pub fn run_source_with_config(source: &str,
                              config: Config,
                              output: &mut dyn Write)
                              -> Result<Value, Error> {
    let program = parse_source(source)?;
    run_program(&program, config, output)
}

/// Runs an already parsed program.
pub fn run_program(program: &Program, config: Config, output: &mut dyn Write) -> Result<Value, Error> {
    Ok(Interpreter::with_config(config, output).run(program)?)
}
