use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates `+ - * / %`.
    ///
    /// Two integers stay integers: results are checked for overflow and
    /// division truncates toward zero. If either side is a float both are
    /// computed as floats. `+` with a string on either side concatenates
    /// the display forms, as long as the other side is a string, a number or
    /// a boolean. `+` on two lists builds a new list holding the elements of
    /// both.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero divisor of `/` or `%`, `IntegerOverflow`
    /// and `TypeMismatch`.
    ///
    /// # Example
    /// ```
    /// use linger::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let pos = Position::new(1, 1);
    /// let v = Interpreter::eval_arithmetic(BinaryOperator::Div, &Value::Int(7), &Value::Int(2), pos);
    /// assert_eq!(v.unwrap(), Value::Int(3));
    ///
    /// let v = Interpreter::eval_arithmetic(BinaryOperator::Add, &"n=".into(), &Value::Int(2), pos);
    /// assert_eq!(v.unwrap(), Value::Str("n=2".into()));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           pos: Position)
                           -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => int_op(op, *a, *b, pos),
            (Value::List(a), Value::List(b)) if op == BinaryOperator::Add => {
                Ok(Value::from(a.iter().chain(b.iter()).cloned().collect::<Vec<_>>()))
            },
            (Value::Str(_), _) | (_, Value::Str(_)) if op == BinaryOperator::Add => {
                concat(left, right, pos)
            },
            _ => match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => float_op(op, a, b, pos),
                _ => Err(mismatch(op, left, right, pos)),
            },
        }
    }
}

fn int_op(op: BinaryOperator, a: i64, b: i64, pos: Position) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
            return Err(RuntimeError::DivisionByZero { pos });
        },
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => unreachable!("int_op used with non arithmetic operator"),
    };
    result.map(Value::Int)
          .ok_or(RuntimeError::IntegerOverflow { pos })
}

fn float_op(op: BinaryOperator, a: f64, b: f64, pos: Position) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div | BinaryOperator::Mod if b == 0.0 => {
            return Err(RuntimeError::DivisionByZero { pos });
        },
        BinaryOperator::Div => a / b,
        BinaryOperator::Mod => a % b,
        _ => unreachable!("float_op used with non arithmetic operator"),
    };
    Ok(Value::Float(result))
}

/// `+` with at least one string operand.
fn concat(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let printable = |v: &Value| {
        matches!(v,
                 Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Bool(_))
    };
    if printable(left) && printable(right) {
        Ok(Value::Str(format!("{left}{right}")))
    } else {
        Err(mismatch(BinaryOperator::Add, left, right, pos))
    }
}

fn mismatch(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("Cannot use '{op}' on {} and {}",
                                                  left.type_name(),
                                                  right.type_name()),
                                 pos }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(2, 5);

    fn arith(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Interpreter::eval_arithmetic(op, &left, &right, POS)
    }

    #[test]
    fn mixed_operands_promote_to_float() {
        assert_eq!(arith(BinaryOperator::Mul, Value::Int(2), Value::Float(1.5)),
                   Ok(Value::Float(3.0)));
        assert_eq!(arith(BinaryOperator::Div, Value::Float(7.0), Value::Int(2)),
                   Ok(Value::Float(3.5)));
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        assert_eq!(arith(BinaryOperator::Div, Value::Int(-7), Value::Int(2)), Ok(Value::Int(-3)));
        assert_eq!(arith(BinaryOperator::Mod, Value::Int(-7), Value::Int(2)), Ok(Value::Int(-1)));
    }

    #[test]
    fn zero_divisors_are_reported() {
        for op in [BinaryOperator::Div, BinaryOperator::Mod] {
            assert_eq!(arith(op, Value::Int(1), Value::Int(0)),
                       Err(RuntimeError::DivisionByZero { pos: POS }));
            assert_eq!(arith(op, Value::Float(1.0), Value::Float(0.0)),
                       Err(RuntimeError::DivisionByZero { pos: POS }));
        }
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(arith(BinaryOperator::Add, Value::Int(i64::MAX), Value::Int(1)),
                   Err(RuntimeError::IntegerOverflow { pos: POS }));
        assert_eq!(arith(BinaryOperator::Div, Value::Int(i64::MIN), Value::Int(-1)),
                   Err(RuntimeError::IntegerOverflow { pos: POS }));
    }

    #[test]
    fn strings_concatenate_with_printable_values() {
        assert_eq!(arith(BinaryOperator::Add, Value::Bool(true), "!".into()),
                   Ok(Value::Str("true!".into())));
        assert_eq!(arith(BinaryOperator::Add, "x".into(), Value::Float(2.0)),
                   Ok(Value::Str("x2.0".into())));
        assert!(matches!(arith(BinaryOperator::Add, "x".into(), Value::Void),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(arith(BinaryOperator::Sub, "x".into(), "y".into()),
                         Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn lists_concatenate_without_touching_their_operands() {
        let left = Value::from(vec![Value::Int(1), Value::Int(2)]);
        let right = Value::from(vec![Value::Int(3)]);
        assert_eq!(arith(BinaryOperator::Add, left.clone(), right),
                   Ok(Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)])));
        assert_eq!(left.to_string(), "[1, 2]");
        assert!(matches!(arith(BinaryOperator::Sub, left.clone(), left.clone()),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(arith(BinaryOperator::Add, left, Value::Int(1)),
                         Err(RuntimeError::TypeMismatch { .. })));
    }
}
