use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, Mutability, Position},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter, Signal},
            function::builtin,
        },
        value::core::{Closure, Value},
    },
};

impl Interpreter<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments left to right. A
    /// bare name that is neither a variable nor a procedure is looked up
    /// among the builtins before it is reported as undefined.
    ///
    /// # Parameters
    /// - `callee`: The expression producing the function.
    /// - `arguments`: Argument expressions.
    /// - `pos`: Position of the call for error reporting.
    /// - `env`: The calling scope.
    ///
    /// # Returns
    /// The function result, `Value::Void` for a body that ends without
    /// `return`.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            pos: Position,
                            env: &Environment)
                            -> EvalResult<Value> {
        if let Expr::Identifier { name, pos: name_pos } = callee
           && self.lookup(name, env).is_none()
        {
            let Some(builtin) = builtin::find(name) else {
                return Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                             pos:  *name_pos, });
            };
            let args = self.eval_arguments(arguments, env)?;
            if !builtin.arity.check(args.len()) {
                let expected = match builtin.arity {
                    builtin::Arity::Exact(n) => n,
                    builtin::Arity::Any => args.len(),
                };
                return Err(RuntimeError::ArityMismatch { name: name.clone(),
                                                         expected,
                                                         found: args.len(),
                                                         pos });
            }
            return (builtin.func)(&mut *self.output, &args, pos);
        }

        let function = self.eval(callee, env)?;
        let args = self.eval_arguments(arguments, env)?;
        self.call_value(&function, args, pos)
    }

    /// Calls a value with already evaluated arguments.
    ///
    /// # Errors
    /// `NotCallable` when `function` is not a function, plus everything
    /// [`Self::call_closure`] reports.
    pub fn call_value(&mut self, function: &Value, args: Vec<Value>, pos: Position) -> EvalResult<Value> {
        match function {
            Value::Function(closure) => self.call_closure(closure, args, pos),
            other => Err(RuntimeError::NotCallable { found: other.type_name(),
                                                     pos }),
        }
    }

    /// Executes a procedure or lambda.
    ///
    /// The body runs in a new scope whose parent is the scope the function
    /// captured, not the caller's. Parameters are bound there as constants.
    ///
    /// # Errors
    /// - `ArityMismatch` for a wrong number of arguments.
    /// - `StackOverflow` once `max_call_depth` calls are active.
    /// - `BreakOutsideLoop` / `ContinueOutsideLoop` when a loop-control
    ///   statement escapes the body.
    pub fn call_closure(&mut self,
                        closure: &Rc<Closure>,
                        args: Vec<Value>,
                        pos: Position)
                        -> EvalResult<Value> {
        let def = &closure.def;
        if args.len() != closure.arity() {
            return Err(RuntimeError::ArityMismatch { name: def.name.clone(),
                                                     expected: closure.arity(),
                                                     found: args.len(),
                                                     pos });
        }
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow { limit: self.config.max_call_depth });
        }

        let scope = closure.env.child();
        for (param, value) in def.params.iter().zip(args) {
            scope.define(param, value, Mutability::Const);
        }

        trace!(function = %def.name, depth = self.depth + 1, "call");

        self.depth += 1;
        let signal = self.exec_block(&def.body, &scope);
        self.depth -= 1;

        match signal? {
            Signal::Returning(value) => Ok(value),
            Signal::Normal => Ok(Value::Void),
            Signal::Breaking(pos) => Err(RuntimeError::BreakOutsideLoop { pos }),
            Signal::Continuing(pos) => Err(RuntimeError::ContinueOutsideLoop { pos }),
        }
    }

    fn eval_arguments(&mut self, arguments: &[Expr], env: &Environment) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg, env)).collect()
    }
}
