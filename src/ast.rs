use std::rc::Rc;

/// A location in the source text.
///
/// Rows and columns are 1-based. Every AST node and every located error
/// carries one so diagnostics can point at the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Source row, starting at 1.
    pub row: usize,
    /// Column within the row, starting at 1.
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Represents a literal value in the language.
///
/// The parser decides between `Int` and `Float` from the presence of a
/// decimal point; string literals arrive with their escapes already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string literal.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// `nil`.
    Nil,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A parsed program: the top-level procedures in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Procedure definitions, names are unique.
    pub procedures: Vec<Rc<FunctionDef>>,
}

impl Program {
    /// Looks up a top-level procedure by name.
    #[must_use]
    pub fn procedure(&self, name: &str) -> Option<&Rc<FunctionDef>> {
        self.procedures.iter().find(|p| p.name == name)
    }
}

/// The definition of a callable: a named `proc` or an anonymous `lam`.
///
/// Lambdas share this shape so that procedures and closures are invoked
/// through the same call path. Anonymous definitions are named
/// [`FunctionDef::LAMBDA_NAME`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The procedure name, or `<lambda>`.
    pub name:   String,
    /// Parameter names, unique within the definition.
    pub params: Vec<String>,
    /// The statements of the body.
    pub body:   Vec<Statement>,
    /// Position of the `proc` or `lam` keyword.
    pub pos:    Position,
}

impl FunctionDef {
    /// Display name used for anonymous functions.
    pub const LAMBDA_NAME: &'static str = "<lambda>";

    /// Returns `true` when this definition came from a `lam` literal.
    #[must_use]
    pub fn is_lambda(&self) -> bool {
        self.name == Self::LAMBDA_NAME
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant records the position of the token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant such as `42`, `2.5`, `"hi"` or `true`.
    Literal {
        /// The literal value.
        value: LiteralValue,
        /// Position in the source code.
        pos:   Position,
    },
    /// A reference to a variable or procedure by name.
    Identifier {
        /// The referenced name.
        name: String,
        /// Position in the source code.
        pos:  Position,
    },
    /// A prefix or postfix unary operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand. Always an `Identifier` for increments and decrements.
        operand: Box<Expr>,
        /// Position of the operator.
        pos:     Position,
    },
    /// An arithmetic or comparison operation.
    Binary {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
        /// Position of the operator.
        pos:   Position,
    },
    /// `&&` or `||`. The right side is only evaluated when needed.
    Logical {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand.
        right: Box<Expr>,
        /// Position of the operator.
        pos:   Position,
    },
    /// A call. `callee` may itself be a call, as in `f(x)(y)`.
    Call {
        /// The expression producing the function.
        callee:    Box<Expr>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Expr>,
        /// Position of the opening parenthesis.
        pos:       Position,
    },
    /// `lam(params) -> { body }`.
    Lambda {
        /// The anonymous definition.
        def: Rc<FunctionDef>,
        /// Position of the `lam` keyword.
        pos: Position,
    },
    /// Indexing into a list or string (e.g., `xs[2]`).
    Index {
        /// The indexed expression.
        target: Box<Expr>,
        /// The index, which must evaluate to an integer.
        index:  Box<Expr>,
        /// Position of the opening bracket.
        pos:    Position,
    },
}

impl Expr {
    /// Returns the source position of the expression.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { pos, .. }
            | Self::Identifier { pos, .. }
            | Self::Unary { pos, .. }
            | Self::Binary { pos, .. }
            | Self::Logical { pos, .. }
            | Self::Call { pos, .. }
            | Self::Lambda { pos, .. }
            | Self::Index { pos, .. } => *pos,
        }
    }
}

/// Whether a binding may be reassigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mutability {
    /// Declared with `let`.
    Mutable,
    /// Declared with `const`, or bound as a parameter.
    Const,
}

/// A statement.
///
/// Only the minimal vocabulary survives parsing: `for` loops, `else if`
/// chains and compound assignments are rewritten into the variants below.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value;` or `const name = value;`. Always creates a fresh
    /// binding in the current scope.
    Let {
        /// The declared name.
        name:       String,
        /// The initializer.
        value:      Expr,
        /// `Const` for `const` declarations.
        mutability: Mutability,
        /// Position of the declared name.
        pos:        Position,
    },
    /// `name = value;`. Never creates a binding.
    Assign {
        /// The target name.
        name:  String,
        /// The new value.
        value: Expr,
        /// Position of the target name.
        pos:   Position,
    },
    /// `return;` or `return value;`.
    Return {
        /// The returned expression, if any.
        value: Option<Expr>,
        /// Position of the `return` keyword.
        pos:   Position,
    },
    /// A plain two-armed conditional.
    If {
        /// The condition, which must evaluate to a boolean.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: Vec<Statement>,
        /// Statements run otherwise. An `else if` is a nested `If` here.
        else_branch: Option<Vec<Statement>>,
        /// Position of the `if` keyword.
        pos:         Position,
    },
    /// `while (condition) { body }`.
    While {
        /// Re-tested before each iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Statement>,
        /// Position of the `while` (or `for`) keyword.
        pos:       Position,
    },
    /// A braced block opening a child scope.
    Block {
        /// The statements of the block.
        statements: Vec<Statement>,
        /// Position of the opening brace.
        pos:        Position,
    },
    /// The user body of a desugared `for` loop.
    ///
    /// Runs like a block but absorbs a `continue` signal, so the update
    /// statement that follows it inside the generated `while` still runs.
    LoopBody {
        /// The user-written loop body.
        statements: Vec<Statement>,
        /// Position of the body's opening brace.
        pos:        Position,
    },
    /// An expression evaluated for its effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Position of the first token.
        pos:  Position,
    },
    /// `break;`
    Break {
        /// Position of the keyword.
        pos: Position,
    },
    /// `continue;`
    Continue {
        /// Position of the keyword.
        pos: Position,
    },
}

impl Statement {
    /// Returns the source position of the statement.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Let { pos, .. }
            | Self::Assign { pos, .. }
            | Self::Return { pos, .. }
            | Self::If { pos, .. }
            | Self::While { pos, .. }
            | Self::Block { pos, .. }
            | Self::LoopBody { pos, .. }
            | Self::Expression { pos, .. }
            | Self::Break { pos }
            | Self::Continue { pos } => *pos,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons. The logical
/// connectives live in [`LogicalOperator`] because they short-circuit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// A short-circuiting logical connective.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&`, stops at the first `false`.
    And,
    /// `||`, stops at the first `true`.
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Logical NOT (`!x`).
    Not,
    /// Arithmetic negation (`-x`).
    Negate,
    /// `++x`, yields the incremented value.
    PreIncrement,
    /// `--x`, yields the decremented value.
    PreDecrement,
    /// `x++`, yields the value before incrementing.
    PostIncrement,
    /// `x--`, yields the value before decrementing.
    PostDecrement,
}

impl UnaryOperator {
    /// Returns `true` for the operators that write back to their operand.
    #[must_use]
    pub const fn is_update(self) -> bool {
        !matches!(self, Self::Not | Self::Negate)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Not => "!",
            Self::Negate => "-",
            Self::PreIncrement | Self::PostIncrement => "++",
            Self::PreDecrement | Self::PostDecrement => "--",
        };
        write!(f, "{operator}")
    }
}
