use std::rc::Rc;

use crate::{
    ast::{FunctionDef, LiteralValue},
    interpreter::environment::Environment,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, procedure returns, and conditions.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit integer.
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators and required by `if`,
    /// `while` and `for` conditions.
    Bool(bool),
    /// The result of a procedure that returns nothing.
    Void,
    /// `nil`, the "no element" marker returned by `head` and `rest` of an
    /// empty list.
    Nil,
    /// An immutable list. Cloning shares the elements.
    List(Rc<Vec<Self>>),
    /// A procedure or lambda together with its captured scope.
    Function(Rc<Closure>),
}

/// A function value: a definition plus the scope active where it was created.
///
/// The scope is shared, not copied. Assignments made to captured variables
/// after the closure was created are visible when it runs, and assignments
/// made by the closure are visible to everyone else holding the scope.
#[derive(Debug)]
pub struct Closure {
    /// The procedure or lambda definition.
    pub def: Rc<FunctionDef>,
    /// The defining scope; calls run in a child of it.
    pub env: Environment,
}

impl Closure {
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, env: Environment) -> Self {
        Self { def, env }
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.def.params.len()
    }
}

impl PartialEq for Value {
    /// Structural equality for host-side comparisons; functions are equal only
    /// to themselves. Language-level `==` lives in the evaluator.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Void, Self::Void) | (Self::Nil, Self::Nil) => true,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Int(v) => Self::Int(*v),
            LiteralValue::Float(v) => Self::Float(*v),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Nil => Self::Nil,
        }
    }
}

impl Value {
    /// Name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Void => "void",
            Self::Nil => "nil",
            Self::List(_) => "list",
            Self::Function(_) => "function",
        }
    }

    /// Returns the number as a float, promoting integers. `None` for
    /// non-numeric values.
    ///
    /// Integers beyond 2^53 round to the nearest representable float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl std::fmt::Display for Value {
    /// Formats the value as `print` shows it.
    ///
    /// Floats with no fractional part keep a trailing `.0` so they stay
    /// distinguishable from integers. Lists print their elements between
    /// brackets, separated by `, `.
    ///
    /// # Example
    /// ```
    /// use linger::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Float(3.0).to_string(), "3.0");
    /// assert_eq!(Value::Float(2.5).to_string(), "2.5");
    /// assert_eq!(Value::Str("hi".into()).to_string(), "hi");
    ///
    /// let nested = Value::from(vec![Value::Int(4), Value::Int(5)]);
    /// let list = Value::from(vec![Value::Int(1), Value::Nil, nested]);
    /// assert_eq!(list.to_string(), "[1, nil, [4, 5]]");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Void => write!(f, "void"),
            Self::Nil => write!(f, "nil"),
            Self::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },
            Self::Function(closure) if closure.def.is_lambda() => write!(f, "<lambda>"),
            Self::Function(closure) => write!(f, "<proc {}>", closure.def.name),
        }
    }
}
