/// Operator dispatch for binary expressions.
pub mod core;

/// Arithmetic on numbers and string concatenation.
///
/// Integer arithmetic is checked; mixing an integer with a float promotes
/// the integer.
pub mod arithmetic;

/// Equality and ordering.
pub mod comparison;

/// The short-circuiting `&&` and `||`.
pub mod logic;
