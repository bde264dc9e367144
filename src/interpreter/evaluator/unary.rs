use crate::{
    ast::{Expr, Position, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a unary expression.
    ///
    /// `!` and `-` evaluate their operand and apply [`Self::apply_unary`].
    /// The increment and decrement operators read a variable, write the
    /// stepped value back through the scope chain and yield either the new
    /// value (prefix) or the old one (postfix).
    ///
    /// # Errors
    /// `InvalidAssignmentTarget` if an update is applied to anything but a
    /// name, plus every error of reading and assigning that name.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             pos: Position,
                             env: &Environment)
                             -> EvalResult<Value> {
        if !op.is_update() {
            let value = self.eval(operand, env)?;
            return Self::apply_unary(op, &value, pos);
        }

        let Expr::Identifier { name, pos: name_pos } = operand else {
            return Err(RuntimeError::InvalidAssignmentTarget { pos });
        };

        let old = self.eval_identifier(name, *name_pos, env)?;
        let new = Self::apply_unary(op, &old, pos)?;
        self.assign(name, new.clone(), env, pos)?;

        Ok(match op {
            UnaryOperator::PreIncrement | UnaryOperator::PreDecrement => new,
            _ => old,
        })
    }

    /// Applies an operator to an already evaluated value.
    ///
    /// For the update operators this computes the stepped value only; writing
    /// it back is left to the caller.
    ///
    /// # Errors
    /// `ExpectedBoolean` for `!` on a non-boolean, `TypeMismatch` for the
    /// numeric operators on a non-number and `IntegerOverflow` when an integer
    /// result leaves the 64-bit range.
    ///
    /// # Example
    /// ```
    /// use linger::{
    ///     ast::{Position, UnaryOperator},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let pos = Position::new(1, 1);
    /// let v = Interpreter::apply_unary(UnaryOperator::Negate, &Value::Int(5), pos).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Interpreter::apply_unary(UnaryOperator::Not, &Value::Bool(false), pos).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// assert!(Interpreter::apply_unary(UnaryOperator::Not, &Value::Int(0), pos).is_err());
    /// ```
    pub fn apply_unary(op: UnaryOperator, value: &Value, pos: Position) -> EvalResult<Value> {
        match op {
            UnaryOperator::Not => match value {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(RuntimeError::ExpectedBoolean { found: other.type_name(),
                                                             pos }),
            },
            UnaryOperator::Negate => match value {
                Value::Int(n) => n.checked_neg()
                                  .map(Value::Int)
                                  .ok_or(RuntimeError::IntegerOverflow { pos }),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => {
                    Err(RuntimeError::TypeMismatch { details: format!("Cannot apply '{op}' to {}",
                                                                      other.type_name()),
                                                     pos })
                },
            },
            UnaryOperator::PreIncrement | UnaryOperator::PostIncrement => step(value, 1, op, pos),
            UnaryOperator::PreDecrement | UnaryOperator::PostDecrement => step(value, -1, op, pos),
        }
    }
}

/// Adds `delta` to a number for `++`/`--`.
fn step(value: &Value, delta: i64, op: UnaryOperator, pos: Position) -> EvalResult<Value> {
    match value {
        Value::Int(n) => n.checked_add(delta)
                          .map(Value::Int)
                          .ok_or(RuntimeError::IntegerOverflow { pos }),
        #[allow(clippy::cast_precision_loss)]
        Value::Float(f) => Ok(Value::Float(f + delta as f64)),
        other => Err(RuntimeError::TypeMismatch { details: format!("Cannot apply '{op}' to {}",
                                                                   other.type_name()),
                                                  pos }),
    }
}
