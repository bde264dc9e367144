use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        environment::{AssignError, Environment},
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Resolves a name to a value.
    ///
    /// Variables are searched first, innermost scope outward; procedures are
    /// consulted only when no variable of that name exists.
    #[must_use]
    pub fn lookup(&self, name: &str, env: &Environment) -> Option<Value> {
        env.get(name).or_else(|| {
                         self.procedures
                             .get(name)
                             .map(|closure| Value::Function(closure.clone()))
                     })
    }

    /// Evaluates a bare name.
    ///
    /// # Errors
    /// `UndefinedVariable` when neither a variable nor a procedure has the
    /// name.
    pub(crate) fn eval_identifier(&self,
                                  name: &str,
                                  pos: Position,
                                  env: &Environment)
                                  -> EvalResult<Value> {
        self.lookup(name, env)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             pos })
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Assignment never declares. A name that only refers to a procedure is
    /// reported separately from a name that refers to nothing.
    ///
    /// # Errors
    /// `ConstReassignment`, `ProcedureReassignment` or `UndefinedVariable`.
    pub(crate) fn assign(&self,
                         name: &str,
                         value: Value,
                         env: &Environment,
                         pos: Position)
                         -> EvalResult<()> {
        env.assign(name, value).map_err(|err| match err {
                                   AssignError::Const => {
                                       RuntimeError::ConstReassignment { name: name.to_string(),
                                                                         pos }
                                   },
                                   AssignError::Undefined if self.procedures.contains(name) => {
                                       RuntimeError::ProcedureReassignment { name: name.to_string(),
                                                                             pos }
                                   },
                                   AssignError::Undefined => {
                                       RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                         pos }
                                   },
                               })
    }

    /// Evaluates an indexing expression such as `xs[i]`.
    ///
    /// The indexed expression is evaluated before the index. Lists yield
    /// the element at the index, strings a one-character string. Indices
    /// count from zero.
    ///
    /// # Errors
    /// - `NotIndexable` when the target is neither a list nor a string.
    /// - `ExpectedInteger` when the index is not an `int`.
    /// - `IndexOutOfBounds` when the index is negative or past the end.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             pos: Position,
                             env: &Environment)
                             -> EvalResult<Value> {
        let target = self.eval(target, env)?;
        let index_value = self.eval(index, env)?;

        if !matches!(target, Value::List(_) | Value::Str(_)) {
            return Err(RuntimeError::NotIndexable { found: target.type_name(),
                                                    pos });
        }
        let Value::Int(i) = index_value else {
            return Err(RuntimeError::ExpectedInteger { found: index_value.type_name(),
                                                       pos:   index.position(), });
        };

        let element = match &target {
            Value::List(values) => {
                usize::try_from(i).ok()
                                  .and_then(|i| values.get(i).cloned())
                                  .ok_or(values.len())
            },
            Value::Str(s) => {
                usize::try_from(i).ok()
                                  .and_then(|i| s.chars().nth(i))
                                  .map(|c| Value::Str(c.to_string()))
                                  .ok_or_else(|| s.chars().count())
            },
            _ => unreachable!("target checked to be indexable"),
        };

        element.map_err(|len| RuntimeError::IndexOutOfBounds { index: i, len, pos })
    }
}
