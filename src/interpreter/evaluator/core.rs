use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, Position, Program},
    config::Config,
    error::RuntimeError,
    interpreter::{
        environment::{Environment, ProcedureTable},
        value::core::{Closure, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing a statement.
///
/// Blocks stop at the first non-`Normal` signal and hand it to their caller.
/// Loops absorb `Breaking` and `Continuing`; calls absorb `Returning`.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding to the enclosing call.
    Returning(Value),
    /// A `break` is unwinding to the enclosing loop.
    Breaking(Position),
    /// A `continue` is unwinding to the enclosing loop.
    Continuing(Position),
}

/// Stores the runtime evaluation state.
///
/// Holds the procedure table, the root variable scope, the configuration, the
/// current call depth, and the sink builtins print to.
///
/// ## Usage
///
/// Create one per run, then call [`Interpreter::run`] with a parsed program.
pub struct Interpreter<'o> {
    /// Top-level procedures, kept apart from variables.
    pub(crate) procedures: ProcedureTable,
    /// The root variable scope; procedures close over it.
    pub(crate) globals:    Environment,
    pub(crate) config:     Config,
    /// Number of calls currently active.
    pub(crate) depth:      usize,
    pub(crate) output:     &'o mut dyn Write,
}

impl<'o> Interpreter<'o> {
    /// Creates an interpreter with the default configuration.
    #[must_use]
    pub fn new(output: &'o mut dyn Write) -> Self {
        Self::with_config(Config::default(), output)
    }

    /// Creates an interpreter with the given configuration.
    #[must_use]
    pub fn with_config(config: Config, output: &'o mut dyn Write) -> Self {
        Self { procedures: ProcedureTable::default(),
               globals: Environment::new(),
               config,
               depth: 0,
               output }
    }

    /// Runs `program` by calling its entry procedure with no arguments.
    ///
    /// # Returns
    /// The entry procedure's return value, or `Value::Void` if it returns
    /// nothing.
    ///
    /// # Errors
    /// `MissingEntryPoint` if no procedure has the configured entry name, or
    /// the first runtime error raised while running.
    ///
    /// # Example
    /// ```
    /// use linger::{
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     parse_source,
    /// };
    ///
    /// let program = parse_source("proc main() { return 6 * 7; }").unwrap();
    /// let mut out = Vec::new();
    /// let value = Interpreter::new(&mut out).run(&program).unwrap();
    /// assert_eq!(value, Value::Int(42));
    /// ```
    pub fn run(&mut self, program: &Program) -> EvalResult<Value> {
        self.procedures = ProcedureTable::new(program, &self.globals);

        let entry = self.config.entry_point.clone();
        let closure = self.procedures
                          .get(&entry)
                          .cloned()
                          .ok_or_else(|| RuntimeError::MissingEntryPoint { name: entry.clone() })?;

        debug!(entry = %entry, procedures = self.procedures.count(), "running program");

        let result = self.call_closure(&closure, Vec::new(), closure.def.pos);
        self.flush(closure.def.pos)?;
        result
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches based on expression variant: literals, names, unary and
    /// binary operations, logical connectives, calls, lambdas and indexing.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The scope names are resolved in.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, pos } => self.eval_identifier(name, *pos, env),
            Expr::Unary { op, operand, pos } => self.eval_unary(*op, operand, *pos, env),
            Expr::Binary { left,
                           op,
                           right,
                           pos, } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(*op, &left, &right, *pos)
            },
            Expr::Logical { left,
                            op,
                            right,
                            .. } => self.eval_logical(*op, left, right, env),
            Expr::Call { callee,
                         arguments,
                         pos, } => self.eval_call(callee, arguments, *pos, env),
            Expr::Lambda { def, .. } => {
                Ok(Value::Function(Rc::new(Closure::new(Rc::clone(def), env.clone()))))
            },
            Expr::Index { target, index, pos } => self.eval_index(target, index, *pos, env),
        }
    }

    fn flush(&mut self, pos: Position) -> EvalResult<()> {
        self.output
            .flush()
            .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                pos })
    }
}
