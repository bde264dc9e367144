/// The evaluator module executes a parsed program.
///
/// The evaluator walks the AST directly. Statements produce control signals
/// (`return`, `break`, `continue`) that propagate outward until a loop or a
/// call absorbs them; expressions produce values.
///
/// # Responsibilities
/// - Runs the entry procedure and every call it makes, with a bounded call
///   depth.
/// - Implements the operators, closures and the builtin functions.
/// - Reports runtime errors with the position of the offending node.
pub mod evaluator;
/// Lexical scopes and the procedure table.
///
/// Scopes form a parent chain of shared, mutable handles. Closures hold a
/// handle to the scope they were created in rather than a copy of it.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// tagged with its row and column. String escapes are decoded here and
/// comments are dropped.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Handles numeric and string literals, identifiers, keywords and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per grammar level. `for`
/// loops, `else if` chains and compound assignments are desugared while
/// parsing, so the evaluator never sees them.
///
/// # Responsibilities
/// - Converts tokens into a `Program` of procedures.
/// - Validates the grammar, reporting errors with row and column.
/// - Rejects duplicate procedures and parameters.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Integers, floats, strings, booleans, the void result and functions
/// (closures over a scope).
pub mod value;
