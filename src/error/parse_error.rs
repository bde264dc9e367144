use crate::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Parsing stops at the first error; every variant is located.
pub enum ParseError {
    /// A character sequence that starts no token.
    InvalidToken {
        /// The offending source text.
        lexeme: String,
        /// Where the text starts.
        pos:    Position,
    },
    /// A string literal without its closing quote.
    UnterminatedString {
        /// Position of the opening quote.
        pos: Position,
    },
    /// A backslash escape the lexer does not know.
    InvalidEscape {
        /// The character following the backslash.
        escape: char,
        /// Position of the string literal.
        pos:    Position,
    },
    /// An integer literal that does not fit in 64 bits.
    LiteralTooLarge {
        /// Position of the literal.
        pos: Position,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token actually found.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// Position of the found token.
        pos:      Position,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// Position just past the last token.
        pos:      Position,
    },
    /// A reserved keyword used where an identifier is required.
    KeywordAsIdentifier {
        /// The keyword.
        keyword: String,
        /// Position of the keyword.
        pos:     Position,
    },
    /// A second procedure with an already defined name.
    DuplicateProcedure {
        /// The procedure name.
        name: String,
        /// Position of the second definition's name.
        pos:  Position,
    },
    /// The same name used twice in one parameter list.
    DuplicateParameter {
        /// The parameter name.
        name: String,
        /// Position of the repeated name.
        pos:  Position,
    },
    /// A `,` directly followed by `)` in an argument or parameter list.
    TrailingComma {
        /// Position of the comma.
        pos: Position,
    },
    /// A braced block was required.
    ExpectedBlock {
        /// The token found instead.
        found: String,
        /// Position of that token.
        pos:   Position,
    },
    /// The left side of `=` or a compound assignment is not a name.
    InvalidAssignmentTarget {
        /// Position of the assignment operator.
        pos: Position,
    },
    /// `++` or `--` applied to something other than a name.
    InvalidIncrementTarget {
        /// Position of the operator.
        pos: Position,
    },
    /// A `for` initializer that is not a declaration, assignment or increment.
    InvalidForInitializer {
        /// Position of the initializer.
        pos: Position,
    },
    /// A `for` update that is not an assignment or increment.
    InvalidForUpdate {
        /// Position of the update.
        pos: Position,
    },
}

/// The kind of a [`ParseError`], without its payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidToken,
    UnterminatedString,
    InvalidEscape,
    LiteralTooLarge,
    UnexpectedToken,
    UnexpectedEndOfInput,
    KeywordAsIdentifier,
    DuplicateProcedure,
    DuplicateParameter,
    TrailingComma,
    ExpectedBlock,
    InvalidAssignmentTarget,
    InvalidIncrementTarget,
    InvalidForInitializer,
    InvalidForUpdate,
}

impl ParseError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidToken { .. } => ParseErrorKind::InvalidToken,
            Self::UnterminatedString { .. } => ParseErrorKind::UnterminatedString,
            Self::InvalidEscape { .. } => ParseErrorKind::InvalidEscape,
            Self::LiteralTooLarge { .. } => ParseErrorKind::LiteralTooLarge,
            Self::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            Self::UnexpectedEndOfInput { .. } => ParseErrorKind::UnexpectedEndOfInput,
            Self::KeywordAsIdentifier { .. } => ParseErrorKind::KeywordAsIdentifier,
            Self::DuplicateProcedure { .. } => ParseErrorKind::DuplicateProcedure,
            Self::DuplicateParameter { .. } => ParseErrorKind::DuplicateParameter,
            Self::TrailingComma { .. } => ParseErrorKind::TrailingComma,
            Self::ExpectedBlock { .. } => ParseErrorKind::ExpectedBlock,
            Self::InvalidAssignmentTarget { .. } => ParseErrorKind::InvalidAssignmentTarget,
            Self::InvalidIncrementTarget { .. } => ParseErrorKind::InvalidIncrementTarget,
            Self::InvalidForInitializer { .. } => ParseErrorKind::InvalidForInitializer,
            Self::InvalidForUpdate { .. } => ParseErrorKind::InvalidForUpdate,
        }
    }

    /// Returns where the error occurred.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidToken { pos, .. }
            | Self::UnterminatedString { pos }
            | Self::InvalidEscape { pos, .. }
            | Self::LiteralTooLarge { pos }
            | Self::UnexpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos, .. }
            | Self::KeywordAsIdentifier { pos, .. }
            | Self::DuplicateProcedure { pos, .. }
            | Self::DuplicateParameter { pos, .. }
            | Self::TrailingComma { pos }
            | Self::ExpectedBlock { pos, .. }
            | Self::InvalidAssignmentTarget { pos }
            | Self::InvalidIncrementTarget { pos }
            | Self::InvalidForInitializer { pos }
            | Self::InvalidForUpdate { pos } => *pos,
        }
    }

    /// Returns the human readable message without the location prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidToken { lexeme, .. } => format!("Unrecognised input '{lexeme}'."),
            Self::UnterminatedString { .. } => "String literal is missing its closing quote.".to_string(),
            Self::InvalidEscape { escape, .. } => format!("Unknown escape sequence '\\{escape}'."),
            Self::LiteralTooLarge { .. } => "Integer literal is too large.".to_string(),
            Self::UnexpectedToken { found, expected, .. } => {
                format!("Unexpected token {found}, expected {expected}.")
            },
            Self::UnexpectedEndOfInput { expected, .. } => {
                format!("Unexpected end of input, expected {expected}.")
            },
            Self::KeywordAsIdentifier { keyword, .. } => {
                format!("Keyword '{keyword}' cannot be used as an identifier.")
            },
            Self::DuplicateProcedure { name, .. } => {
                format!("Procedure '{name}' is already defined.")
            },
            Self::DuplicateParameter { name, .. } => {
                format!("Parameter '{name}' appears more than once.")
            },
            Self::TrailingComma { .. } => "Trailing comma before ')'.".to_string(),
            Self::ExpectedBlock { found, .. } => format!("Expected a '{{' block, found {found}."),
            Self::InvalidAssignmentTarget { .. } => {
                "Only a variable name can be assigned to.".to_string()
            },
            Self::InvalidIncrementTarget { .. } => {
                "Only a variable name can be incremented or decremented.".to_string()
            },
            Self::InvalidForInitializer { .. } => {
                "A for loop initializer must be a declaration, an assignment or an increment."
                    .to_string()
            },
            Self::InvalidForUpdate { .. } => {
                "A for loop update must be an assignment or an increment.".to_string()
            },
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at {}: {}", self.position(), self.message())
    }
}

impl std::error::Error for ParseError {}
