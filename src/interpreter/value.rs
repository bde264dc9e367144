/// Runtime values and closures.
///
/// Defines the `Value` enum produced by evaluation and the `Closure` type that
/// pairs a function definition with the scope it was created in.
pub mod core;
