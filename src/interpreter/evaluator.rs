/// Binary operator evaluation logic.
///
/// Arithmetic with integer-to-float promotion, string concatenation,
/// comparisons and the short-circuiting logical connectives.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Negation, logical NOT, and the increment and decrement operators that
/// write back to a variable.
pub mod unary;

/// Core evaluation logic: the interpreter state, control signals, the entry
/// point and expression dispatch.
pub mod core;

/// Statement execution and the propagation of control signals through
/// blocks, loops and conditionals.
pub mod statement;

/// Helpers shared by evaluation logic: name resolution and assignment.
pub mod utils;

/// Calls of procedures, closures and builtins.
pub mod function;
