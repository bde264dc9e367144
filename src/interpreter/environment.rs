use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::{Mutability, Program},
    interpreter::value::core::{Closure, Value},
};

/// A named value together with whether it may be reassigned.
#[derive(Debug, Clone)]
pub struct Binding {
    pub value:      Value,
    pub mutability: Mutability,
}

/// Why an assignment through the scope chain failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// No scope on the chain binds the name.
    Undefined,
    /// The nearest binding is `const`.
    Const,
}

struct Scope {
    bindings: HashMap<String, Binding>,
    parent:   Option<Environment>,
}

/// A handle to one scope in the chain of lexical scopes.
///
/// Cloning the handle shares the scope. A scope lives as long as any block,
/// call or closure still holds a handle to it; lookups only ever walk outward
/// to parents.
///
/// # Example
/// ```
/// use linger::{
///     ast::Mutability,
///     interpreter::{environment::Environment, value::core::Value},
/// };
///
/// let outer = Environment::new();
/// outer.define("x", Value::Int(1), Mutability::Mutable);
///
/// let inner = outer.child();
/// inner.define("x", Value::Int(2), Mutability::Mutable);
/// assert_eq!(inner.get("x"), Some(Value::Int(2)));
/// assert_eq!(outer.get("x"), Some(Value::Int(1)));
/// ```
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates a root scope with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings: HashMap::new(),
                                          parent:   None, })))
    }

    /// Creates an empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings: HashMap::new(),
                                          parent:   Some(self.clone()), })))
    }

    /// Binds `name` in this scope, shadowing outer bindings of the same name.
    ///
    /// Overwrites a binding of the same name in this scope. Closures that
    /// captured this scope would see the new value, so a redeclaration that
    /// must leave earlier closures alone goes into a [`child`](Self::child).
    pub fn define(&self, name: &str, value: Value, mutability: Mutability) {
        self.0
            .borrow_mut()
            .bindings
            .insert(name.to_string(), Binding { value, mutability });
    }

    /// Returns `true` if this scope itself, not a parent, binds `name`.
    #[must_use]
    pub fn binds_locally(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Looks `name` up, walking outward from this scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let scope = env.0.borrow();
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding.value.clone());
            }
            current = scope.parent.clone();
        }
        None
    }

    /// Overwrites the nearest binding of `name`.
    ///
    /// # Errors
    /// `AssignError::Undefined` when no scope binds the name,
    /// `AssignError::Const` when the nearest binding is `const`.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), AssignError> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let mut scope = env.0.borrow_mut();
            if let Some(binding) = scope.bindings.get_mut(name) {
                if binding.mutability == Mutability::Const {
                    return Err(AssignError::Const);
                }
                binding.value = value;
                return Ok(());
            }
            current = scope.parent.clone();
        }
        Err(AssignError::Undefined)
    }

    /// Number of scopes on the chain, including this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = Some(self.clone());
        while let Some(env) = current {
            depth += 1;
            current = env.0.borrow().parent.clone();
        }
        depth
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("depth", &self.depth())
         .finish()
    }
}

/// The top-level scope: procedures only, kept apart from variables.
///
/// Procedures become closures over the root variable scope once, when the
/// table is built.
#[derive(Debug, Default)]
pub struct ProcedureTable {
    procedures: HashMap<String, Rc<Closure>>,
}

impl ProcedureTable {
    /// Builds the table for `program`, closing every procedure over `globals`.
    #[must_use]
    pub fn new(program: &Program, globals: &Environment) -> Self {
        let procedures = program.procedures
                                .iter()
                                .map(|def| {
                                    (def.name.clone(),
                                     Rc::new(Closure::new(Rc::clone(def), globals.clone())))
                                })
                                .collect();
        Self { procedures }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<Closure>> {
        self.procedures.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    /// Number of procedures in the program.
    #[must_use]
    pub fn count(&self) -> usize {
        self.procedures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_updates_the_nearest_binding() {
        let outer = Environment::new();
        outer.define("x", Value::Int(1), Mutability::Mutable);
        let inner = outer.child();

        inner.assign("x", Value::Int(7)).unwrap();
        assert_eq!(outer.get("x"), Some(Value::Int(7)));
    }

    #[test]
    fn assignment_never_declares() {
        let env = Environment::new();
        assert_eq!(env.assign("missing", Value::Void), Err(AssignError::Undefined));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn const_bindings_reject_assignment() {
        let env = Environment::new();
        env.define("k", Value::Int(1), Mutability::Const);
        assert_eq!(env.assign("k", Value::Int(2)), Err(AssignError::Const));
        assert_eq!(env.get("k"), Some(Value::Int(1)));
    }

    #[test]
    fn shared_handles_see_each_others_writes() {
        let env = Environment::new();
        env.define("n", Value::Int(0), Mutability::Mutable);
        let alias = env.clone();
        alias.assign("n", Value::Int(5)).unwrap();
        assert_eq!(env.get("n"), Some(Value::Int(5)));
    }

    #[test]
    fn local_bindings_ignore_parents() {
        let outer = Environment::new();
        outer.define("x", Value::Int(1), Mutability::Mutable);
        let inner = outer.child();
        assert!(outer.binds_locally("x"));
        assert!(!inner.binds_locally("x"));
    }

    #[test]
    fn depth_counts_the_chain() {
        let root = Environment::new();
        assert_eq!(root.child().child().depth(), 3);
    }
}
