use std::{cmp::Ordering, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

/// Language-level equality.
///
/// Integers and floats compare numerically after promotion, lists compare
/// element by element, functions are equal only to themselves, and values of
/// unrelated types are never equal.
/// Floats compare through `OrderedFloat`, so `NaN` equals itself.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Void, Value::Void) | (Value::Nil, Value::Nil) => true,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        _ => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => OrderedFloat(a) == OrderedFloat(b),
            _ => false,
        },
    }
}

/// Ordering used by `< > <= >=`.
///
/// Defined for two numbers and for two strings (lexicographic by code
/// point). Every other pairing is unordered.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => {
            let a = left.as_float()?;
            let b = right.as_float()?;
            Some(OrderedFloat(a).cmp(&OrderedFloat(b)))
        },
    }
}

impl Interpreter<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Comparisons never fail: an unordered pair of operands makes every
    /// relational operator `false`, and operands of unrelated types are
    /// simply unequal.
    ///
    /// # Example
    /// ```
    /// use linger::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let one = Value::Int(1);
    /// let text = Value::Str("1".into());
    ///
    /// assert_eq!(Interpreter::eval_comparison(BinaryOperator::Equal, &one, &text),
    ///            Value::Bool(false));
    /// assert_eq!(Interpreter::eval_comparison(BinaryOperator::NotEqual, &one, &text),
    ///            Value::Bool(true));
    /// assert_eq!(Interpreter::eval_comparison(BinaryOperator::Less, &one, &text),
    ///            Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let result = match op {
            BinaryOperator::Equal => values_equal(left, right),
            BinaryOperator::NotEqual => !values_equal(left, right),
            _ => {
                let Some(ordering) = compare_values(left, right) else {
                    return Value::Bool(false);
                };
                match op {
                    BinaryOperator::Less => ordering.is_lt(),
                    BinaryOperator::Greater => ordering.is_gt(),
                    BinaryOperator::LessEqual => ordering.is_le(),
                    BinaryOperator::GreaterEqual => ordering.is_ge(),
                    _ => unreachable!("eval_comparison used with non comparison operator"),
                }
            },
        };
        Value::Bool(result)
    }
}
