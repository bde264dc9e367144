use crate::{
    ast::{Expr, Position, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter, Signal},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Executes statements in order until one of them produces a signal
    /// other than `Normal`, which is returned unchanged.
    ///
    /// The caller chooses the scope. A `let` or `const` that redeclares a
    /// name already bound in the current scope opens a child scope for the
    /// rest of the statements, so closures created before it keep the old
    /// binding.
    pub fn exec_block(&mut self, statements: &[Statement], env: &Environment) -> EvalResult<Signal> {
        let mut scope = env.clone();
        for statement in statements {
            if let Statement::Let { name, .. } = statement
               && scope.binds_locally(name)
            {
                scope = scope.child();
            }
            match self.exec_statement(statement, &scope)? {
                Signal::Normal => {},
                signal => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }

    /// Executes a single statement.
    ///
    /// Every `if` branch, loop iteration and braced block runs in a fresh
    /// child of `env`, so declarations made inside never leak out.
    ///
    /// # Errors
    /// Any error raised by the expressions of the statement, plus
    /// `ExpectedBoolean` for a non-boolean condition.
    pub fn exec_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Signal> {
        match statement {
            Statement::Let { name,
                             value,
                             mutability,
                             .. } => {
                let value = self.eval(value, env)?;
                env.define(name, value, *mutability);
                Ok(Signal::Normal)
            },

            Statement::Assign { name, value, pos } => {
                let value = self.eval(value, env)?;
                self.assign(name, value, env, *pos)?;
                Ok(Signal::Normal)
            },

            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Void,
                };
                Ok(Signal::Returning(value))
            },

            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.eval_condition(condition, env)? {
                    self.exec_block(then_branch, &env.child())
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch, &env.child())
                } else {
                    Ok(Signal::Normal)
                }
            },

            Statement::While { condition, body, .. } => self.exec_while(condition, body, env),

            Statement::Block { statements, .. } => self.exec_block(statements, &env.child()),

            Statement::LoopBody { statements, .. } => {
                match self.exec_block(statements, &env.child())? {
                    Signal::Continuing(_) => Ok(Signal::Normal),
                    signal => Ok(signal),
                }
            },

            Statement::Expression { expr, .. } => {
                self.eval(expr, env)?;
                Ok(Signal::Normal)
            },

            Statement::Break { pos } => Ok(Signal::Breaking(*pos)),
            Statement::Continue { pos } => Ok(Signal::Continuing(*pos)),
        }
    }

    /// Runs a `while` loop.
    ///
    /// `break` leaves the loop, `continue` skips to the next test of the
    /// condition, and `return` propagates outward.
    fn exec_while(&mut self,
                  condition: &Expr,
                  body: &[Statement],
                  env: &Environment)
                  -> EvalResult<Signal> {
        while self.eval_condition(condition, env)? {
            match self.exec_block(body, &env.child())? {
                Signal::Normal | Signal::Continuing(_) => {},
                Signal::Breaking(_) => break,
                signal @ Signal::Returning(_) => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }

    /// Evaluates a condition that must produce a boolean.
    pub(crate) fn eval_condition(&mut self, condition: &Expr, env: &Environment) -> EvalResult<bool> {
        let value = self.eval(condition, env)?;
        expect_bool(&value, condition.position())
    }
}

/// Extracts the boolean from `value`.
///
/// # Errors
/// `ExpectedBoolean` naming the type that was found instead.
pub fn expect_bool(value: &Value, pos: Position) -> EvalResult<bool> {
    value.as_bool()
         .ok_or(RuntimeError::ExpectedBoolean { found: value.type_name(),
                                                pos })
}
