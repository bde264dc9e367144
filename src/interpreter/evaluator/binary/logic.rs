use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            statement::expect_bool,
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The right operand is evaluated only when the left one does not decide
    /// the result, so side effects and errors on the right are skipped for
    /// `false && ...` and `true || ...`.
    ///
    /// # Errors
    /// `ExpectedBoolean` if an operand that gets evaluated is not a boolean.
    pub(crate) fn eval_logical(&mut self,
                               op: LogicalOperator,
                               left: &Expr,
                               right: &Expr,
                               env: &Environment)
                               -> EvalResult<Value> {
        let lhs = self.eval(left, env)?;
        let lhs = expect_bool(&lhs, left.position())?;

        let decided = match op {
            LogicalOperator::And => !lhs,
            LogicalOperator::Or => lhs,
        };
        if decided {
            return Ok(Value::Bool(lhs));
        }

        let rhs = self.eval(right, env)?;
        Ok(Value::Bool(expect_bool(&rhs, right.position())?))
    }
}
