use crate::{
    ast::{BinaryOperator, Position},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, the equality and
    /// relational operators to `eval_comparison`. Both operands have already
    /// been evaluated, left first.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `pos`: Position of the operator for error reporting.
    ///
    /// # Example
    /// ```
    /// use linger::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let pos = Position::new(1, 3);
    /// let result = Interpreter::eval_binary(BinaryOperator::Add, &Value::Int(3), &Value::Int(4), pos);
    /// assert_eq!(result.unwrap(), Value::Int(7));
    ///
    /// let result = Interpreter::eval_binary(BinaryOperator::Less, &Value::Int(3), &Value::Float(3.5), pos);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       pos: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, pos),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Ok(Self::eval_comparison(op, left, right))
            },
        }
    }
}
