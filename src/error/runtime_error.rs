use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to read or assign a name that is not bound.
    UndefinedVariable {
        /// The name.
        name: String,
        /// Where it was used.
        pos:  Position,
    },
    /// Tried to reassign a `const` binding or a parameter.
    ConstReassignment {
        /// The name of the binding.
        name: String,
        /// Where the assignment happened.
        pos:  Position,
    },
    /// Tried to assign to the name of a top-level procedure.
    ProcedureReassignment {
        /// The procedure name.
        name: String,
        /// Where the assignment happened.
        pos:  Position,
    },
    /// An operator received operands of unsupported types.
    TypeMismatch {
        /// What went wrong, naming the operator and the operand types.
        details: String,
        /// Position of the operator.
        pos:     Position,
    },
    /// A condition or logical operand was not a boolean.
    ExpectedBoolean {
        /// The type actually found.
        found: &'static str,
        /// Position of the expression.
        pos:   Position,
    },
    /// Called a value that is not a function.
    NotCallable {
        /// The type actually found.
        found: &'static str,
        /// Position of the call.
        pos:   Position,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// The function name.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// Position of the call.
        pos:      Position,
    },
    /// `/` or `%` with a zero divisor.
    DivisionByZero {
        /// Position of the operator.
        pos: Position,
    },
    /// Integer arithmetic left the 64-bit range.
    IntegerOverflow {
        /// Position of the operator.
        pos: Position,
    },
    /// `break` executed outside any loop of the current call.
    BreakOutsideLoop {
        /// Position of the `break`.
        pos: Position,
    },
    /// `continue` executed outside any loop of the current call.
    ContinueOutsideLoop {
        /// Position of the `continue`.
        pos: Position,
    },
    /// Indexed a value that is neither a list nor a string.
    NotIndexable {
        /// The type actually found.
        found: &'static str,
        /// Position of the opening bracket.
        pos:   Position,
    },
    /// An index below zero or past the last element.
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// Number of elements in the indexed value.
        len:   usize,
        /// Position of the opening bracket.
        pos:   Position,
    },
    /// An index that is not an integer.
    ExpectedInteger {
        /// The type actually found.
        found: &'static str,
        /// Position of the index.
        pos:   Position,
    },
    /// A list builtin received something other than a list.
    ExpectedList {
        /// The type actually found.
        found: &'static str,
        /// Position of the call.
        pos:   Position,
    },
    /// An update operator applied to something other than a name.
    InvalidAssignmentTarget {
        /// Position of the operator.
        pos: Position,
    },
    /// `assert` received `false`.
    AssertionFailed {
        /// Position of the call.
        pos: Position,
    },
    /// A builtin could not write to the output sink.
    Output {
        /// The underlying I/O error message.
        details: String,
        /// Position of the call.
        pos:     Position,
    },
    /// The program has no procedure with the entry point's name.
    MissingEntryPoint {
        /// The entry point name that was looked up.
        name: String,
    },
    /// Calls nested deeper than the configured limit.
    StackOverflow {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// The kind of a [`RuntimeError`], without its payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    ConstReassignment,
    ProcedureReassignment,
    TypeMismatch,
    ExpectedBoolean,
    NotCallable,
    ArityMismatch,
    DivisionByZero,
    IntegerOverflow,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    NotIndexable,
    IndexOutOfBounds,
    ExpectedInteger,
    ExpectedList,
    InvalidAssignmentTarget,
    AssertionFailed,
    Output,
    MissingEntryPoint,
    StackOverflow,
}

impl RuntimeError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> RuntimeErrorKind {
        match self {
            Self::UndefinedVariable { .. } => RuntimeErrorKind::UndefinedVariable,
            Self::ConstReassignment { .. } => RuntimeErrorKind::ConstReassignment,
            Self::ProcedureReassignment { .. } => RuntimeErrorKind::ProcedureReassignment,
            Self::TypeMismatch { .. } => RuntimeErrorKind::TypeMismatch,
            Self::ExpectedBoolean { .. } => RuntimeErrorKind::ExpectedBoolean,
            Self::NotCallable { .. } => RuntimeErrorKind::NotCallable,
            Self::ArityMismatch { .. } => RuntimeErrorKind::ArityMismatch,
            Self::DivisionByZero { .. } => RuntimeErrorKind::DivisionByZero,
            Self::IntegerOverflow { .. } => RuntimeErrorKind::IntegerOverflow,
            Self::BreakOutsideLoop { .. } => RuntimeErrorKind::BreakOutsideLoop,
            Self::ContinueOutsideLoop { .. } => RuntimeErrorKind::ContinueOutsideLoop,
            Self::NotIndexable { .. } => RuntimeErrorKind::NotIndexable,
            Self::IndexOutOfBounds { .. } => RuntimeErrorKind::IndexOutOfBounds,
            Self::ExpectedInteger { .. } => RuntimeErrorKind::ExpectedInteger,
            Self::ExpectedList { .. } => RuntimeErrorKind::ExpectedList,
            Self::InvalidAssignmentTarget { .. } => RuntimeErrorKind::InvalidAssignmentTarget,
            Self::AssertionFailed { .. } => RuntimeErrorKind::AssertionFailed,
            Self::Output { .. } => RuntimeErrorKind::Output,
            Self::MissingEntryPoint { .. } => RuntimeErrorKind::MissingEntryPoint,
            Self::StackOverflow { .. } => RuntimeErrorKind::StackOverflow,
        }
    }

    /// Returns where the error occurred, when it maps to a source location.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::UndefinedVariable { pos, .. }
            | Self::ConstReassignment { pos, .. }
            | Self::ProcedureReassignment { pos, .. }
            | Self::TypeMismatch { pos, .. }
            | Self::ExpectedBoolean { pos, .. }
            | Self::NotCallable { pos, .. }
            | Self::ArityMismatch { pos, .. }
            | Self::DivisionByZero { pos }
            | Self::IntegerOverflow { pos }
            | Self::BreakOutsideLoop { pos }
            | Self::ContinueOutsideLoop { pos }
            | Self::NotIndexable { pos, .. }
            | Self::IndexOutOfBounds { pos, .. }
            | Self::ExpectedInteger { pos, .. }
            | Self::ExpectedList { pos, .. }
            | Self::InvalidAssignmentTarget { pos }
            | Self::AssertionFailed { pos }
            | Self::Output { pos, .. } => Some(*pos),
            Self::MissingEntryPoint { .. }
            | Self::StackOverflow { .. } => None,
        }
    }

    /// Returns the human readable message without the location prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UndefinedVariable { name, .. } => format!("Undefined variable '{name}'."),
            Self::ConstReassignment { name, .. } => {
                format!("Cannot reassign constant '{name}'.")
            },
            Self::ProcedureReassignment { name, .. } => {
                format!("Cannot reassign top-level procedure '{name}'.")
            },
            Self::TypeMismatch { details, .. } => format!("Type mismatch: {details}."),
            Self::ExpectedBoolean { found, .. } => format!("Expected bool, found {found}."),
            Self::NotCallable { found, .. } => format!("Value of type {found} is not callable."),
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  .. } => {
                format!("'{name}' expects {expected} argument(s) but was given {found}.")
            },
            Self::DivisionByZero { .. } => "Division by zero.".to_string(),
            Self::IntegerOverflow { .. } => "Integer overflow.".to_string(),
            Self::BreakOutsideLoop { .. } => "'break' used outside of a loop.".to_string(),
            Self::ContinueOutsideLoop { .. } => "'continue' used outside of a loop.".to_string(),
            Self::NotIndexable { found, .. } => format!("Value of type {found} is not indexable."),
            Self::IndexOutOfBounds { index, len, .. } => {
                format!("Index {index} is out of bounds for length {len}.")
            },
            Self::ExpectedInteger { found, .. } => format!("Expected int, found {found}."),
            Self::ExpectedList { found, .. } => format!("Expected list, found {found}."),
            Self::InvalidAssignmentTarget { .. } => "Invalid assignment target.".to_string(),
            Self::AssertionFailed { .. } => "Assertion failed.".to_string(),
            Self::Output { details, .. } => format!("Failed to write output: {details}."),
            Self::MissingEntryPoint { name } => format!("No procedure named '{name}' to run."),
            Self::StackOverflow { limit } => {
                format!("Maximum call depth of {limit} exceeded.")
            },
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position() {
            Some(pos) => write!(f, "Runtime error at {pos}: {}", self.message()),
            None => write!(f, "Runtime error: {}", self.message()),
        }
    }
}

impl std::error::Error for RuntimeError {}
