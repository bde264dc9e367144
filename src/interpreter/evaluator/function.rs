/// Built-in functions: `print`, `println`, `assert`, `str` and `len`.
pub mod builtin;

/// Calling closures and builtins: arity checks, call depth and parameter
/// binding.
pub mod core;
