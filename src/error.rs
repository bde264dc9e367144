/// Parsing errors.
///
/// Everything that can go wrong before evaluation starts: unrecognised input,
/// malformed literals, unexpected tokens, keyword misuse and duplicate
/// procedures.
pub mod parse_error;
/// Runtime errors.
///
/// Everything the evaluator can raise: type and arity mismatches, undefined
/// names, const and procedure reassignment, division by zero, loop control
/// outside a loop and call depth exhaustion.
pub mod runtime_error;

pub use parse_error::{ParseError, ParseErrorKind};
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

/// Either phase's error.
///
/// The two families stay distinct; this only lets a driver that parses and
/// then runs use `?` across both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source did not parse.
    Parse(ParseError),
    /// The program failed while running.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Self::Runtime(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
