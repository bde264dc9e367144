use logos::{Lexer, Logos};

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalError)]
pub enum Token {
    /// Decimal literals such as `3.14`. The decimal point is what makes a
    /// number a float.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// String literals with their escapes decoded.
    #[token("\"", lex_string)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `proc`
    #[token("proc")]
    Proc,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `return`
    #[token("return")]
    Return,
    /// `lam`
    #[token("lam")]
    Lam,
    /// `nil`, the empty value produced by `head` and `rest` of an empty list.
    #[token("nil")]
    Nil,
    /// Identifier tokens; variable or procedure names such as `x` or `fib`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Multi line comments. */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", block_comment)]
    MultiLineComment,
    /// `->`
    #[token("->")]
    Arrow,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// Line breaks only move the position.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by logos, appended by [`tokenize`].
    Eof,
}

impl Token {
    /// Returns the keyword spelling if this token is a reserved word.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Proc => Some("proc"),
            Self::Let => Some("let"),
            Self::Const => Some("const"),
            Self::If => Some("if"),
            Self::Else => Some("else"),
            Self::While => Some("while"),
            Self::For => Some("for"),
            Self::Break => Some("break"),
            Self::Continue => Some("continue"),
            Self::Return => Some("return"),
            Self::Lam => Some("lam"),
            Self::Nil => Some("nil"),
            Self::Bool(true) => Some("true"),
            Self::Bool(false) => Some("false"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(keyword) = self.keyword() {
            return write!(f, "'{keyword}'");
        }
        let symbol = match self {
            Self::Float(v) => return write!(f, "number '{v}'"),
            Self::Int(v) => return write!(f, "number '{v}'"),
            Self::Str(s) => return write!(f, "string {s:?}"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Eof => return write!(f, "end of input"),
            Self::Arrow => "->",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::NewLine => "newline",
            _ => "comment",
        };
        write!(f, "'{symbol}'")
    }
}

/// Failure reasons reported by the logos callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexicalError {
    /// Input that starts no token.
    #[default]
    InvalidToken,
    /// A string hit a line break or the end of input before its closing quote.
    UnterminatedString,
    /// An unknown `\x` escape inside a string.
    InvalidEscape(char),
    /// An integer literal outside the `i64` range.
    IntegerTooLarge,
}

impl LexicalError {
    fn into_parse_error(self, slice: &str, pos: Position) -> ParseError {
        match self {
            Self::InvalidToken => ParseError::InvalidToken { lexeme: slice.to_string(),
                                                             pos },
            Self::UnterminatedString => ParseError::UnterminatedString { pos },
            Self::InvalidEscape(escape) => ParseError::InvalidEscape { escape, pos },
            Self::IntegerTooLarge => ParseError::LiteralTooLarge { pos },
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current row and the byte offset where it starts, so a token's
/// column can be derived from its span.
pub struct LexerExtras {
    /// The current row in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current row.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Converts source text into positioned tokens.
///
/// The returned stream always ends with [`Token::Eof`], positioned just past
/// the last character, so that end-of-input diagnostics stay located.
///
/// # Errors
/// Returns the first lexical problem as a [`ParseError`]: unrecognised input,
/// an unterminated string, an unknown escape or an oversized integer.
///
/// # Example
/// ```
/// use linger::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1;").unwrap();
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[1].1.col, 5);
/// assert_eq!(tokens.last().unwrap().0, Token::Eof);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let pos = position_of(&lexer, lexer.span().start);
        match result {
            Ok(token) => tokens.push((token, pos)),
            Err(e) => return Err(e.into_parse_error(lexer.slice(), pos)),
        }
    }

    let end = position_of(&lexer, source.len());
    tokens.push((Token::Eof, end));

    Ok(tokens)
}

fn position_of(lexer: &Lexer<Token>, offset: usize) -> Position {
    let line_start = lexer.extras.line_start.min(offset);
    let col = lexer.source()
                   .get(line_start..offset)
                   .map_or(0, |s| s.chars().count());
    Position::new(lexer.extras.line, col + 1)
}

fn newline(lex: &mut Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

fn block_comment(lex: &mut Lexer<Token>) -> logos::Skip {
    let comment = lex.slice();
    if let Some(last) = comment.rfind('\n') {
        lex.extras.line += comment.matches('\n').count();
        lex.extras.line_start = lex.span().start + last + 1;
    }
    logos::Skip
}

/// Scans a string body after its opening quote, decoding escapes.
///
/// Strings may not span lines.
fn lex_string(lex: &mut Lexer<Token>) -> Result<String, LexicalError> {
    let (result, consumed) = decode_string(lex.remainder());
    lex.bump(consumed);
    result
}

/// Decodes a string body, returning the outcome and the number of bytes to
/// consume.
fn decode_string(body: &str) -> (Result<String, LexicalError>, usize) {
    let mut value = String::new();
    let mut chars = body.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => return (Ok(value), offset + 1),
            '\n' => return (Err(LexicalError::UnterminatedString), offset),
            '\\' => {
                let Some((escape_offset, escaped)) = chars.next() else {
                    break;
                };
                let decoded = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    '\\' => '\\',
                    '"' => '"',
                    other => {
                        return (Err(LexicalError::InvalidEscape(other)),
                                escape_offset + other.len_utf8());
                    },
                };
                value.push(decoded);
            },
            other => value.push(other),
        }
    }

    (Err(LexicalError::UnterminatedString), body.len())
}

fn parse_float(lex: &Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_integer(lex: &Lexer<Token>) -> Result<i64, LexicalError> {
    lex.slice().parse().map_err(|_| LexicalError::IntegerTooLarge)
}

fn parse_bool(lex: &Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn numbers_pick_int_or_float_by_decimal_point() {
        assert_eq!(kinds("7 7.5"), vec![Token::Int(7), Token::Float(7.5), Token::Eof]);
    }

    #[test]
    fn keywords_win_over_identifiers_only_on_exact_match() {
        assert_eq!(kinds("proc procs"),
                   vec![Token::Proc, Token::Identifier("procs".into()), Token::Eof]);
    }

    #[test]
    fn rows_and_columns_follow_newlines_and_comments() {
        let tokens = tokenize("let a = 1; // note\n  /* x\n y */ b").unwrap();
        assert_eq!(tokens[0].1, Position::new(1, 1));
        assert_eq!(tokens[4].1, Position::new(1, 10));
        assert_eq!(tokens[5], (Token::Identifier("b".into()), Position::new(3, 7)));
    }

    #[test]
    fn block_comments_may_end_in_extra_stars() {
        assert_eq!(kinds("/* a **/ 1"), vec![Token::Int(1), Token::Eof]);
        assert_eq!(kinds("/***/ 2"), vec![Token::Int(2), Token::Eof]);
        assert_eq!(kinds("/** doc * note **/ 3 /* x */"), vec![Token::Int(3), Token::Eof]);
    }

    #[test]
    fn block_comments_end_at_the_first_close() {
        assert_eq!(kinds("/* a */ 1 /* b */"), vec![Token::Int(1), Token::Eof]);
    }

    #[test]
    fn list_syntax_tokens() {
        assert_eq!(kinds("xs[0] nil"),
                   vec![Token::Identifier("xs".into()),
                        Token::LBracket,
                        Token::Int(0),
                        Token::RBracket,
                        Token::Nil,
                        Token::Eof]);
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(kinds(r#""a\tb\n\"c\"""#),
                   vec![Token::Str("a\tb\n\"c\"".into()), Token::Eof]);
    }

    #[test]
    fn compound_operators_are_single_tokens() {
        assert_eq!(kinds("x += 1; y++ -> &&"),
                   vec![Token::Identifier("x".into()),
                        Token::PlusAssign,
                        Token::Int(1),
                        Token::Semicolon,
                        Token::Identifier("y".into()),
                        Token::PlusPlus,
                        Token::Arrow,
                        Token::AndAnd,
                        Token::Eof]);
    }

    #[test]
    fn lexical_failures_are_located() {
        assert_eq!(tokenize("let s = \"open").unwrap_err(),
                   ParseError::UnterminatedString { pos: Position::new(1, 9) });
        assert_eq!(tokenize("\"\\q\"").unwrap_err(),
                   ParseError::InvalidEscape { escape: 'q',
                                               pos:    Position::new(1, 1), });
        assert_eq!(tokenize("a\n  #").unwrap_err(),
                   ParseError::InvalidToken { lexeme: "#".into(),
                                              pos:    Position::new(2, 3), });
        assert_eq!(tokenize("99999999999999999999").unwrap_err().kind(),
                   crate::error::ParseErrorKind::LiteralTooLarge);
    }
}
