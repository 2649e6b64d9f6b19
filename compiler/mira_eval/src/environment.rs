//! Variable and callable bindings.
//!
//! Variables and callables share one namespace: binding a name in one table
//! removes it from the other. Calls evaluate against a [`snapshot`] so
//! nothing a callee defines leaks back to the caller.
//!
//! [`snapshot`]: Environment::snapshot

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{Callable, Value};

/// Error returned by [`Environment::assign_variable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Name is not bound at all.
    Undefined,
    /// Name is bound to a callable.
    NotAVariable,
}

/// The pair of name-keyed tables visible to one scope.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    variables: FxHashMap<String, Value>,
    callables: FxHashMap<String, Rc<Callable>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any variable or callable of that name.
    pub fn define_variable(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.callables.remove(&name);
        self.variables.insert(name, value);
    }

    /// Bind a callable under its own name, replacing any variable of that name.
    pub fn define_callable(&mut self, callable: Callable) {
        self.variables.remove(&callable.name);
        self.callables.insert(callable.name.clone(), Rc::new(callable));
    }

    /// Overwrite an existing variable. The caller is responsible for
    /// keeping the value's kind.
    pub fn assign_variable(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        match self.variables.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None if self.callables.contains_key(name) => Err(AssignError::NotAVariable),
            None => Err(AssignError::Undefined),
        }
    }

    #[inline]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).copied()
    }

    #[inline]
    pub fn callable(&self, name: &str) -> Option<Rc<Callable>> {
        self.callables.get(name).cloned()
    }

    /// Read access to the variable table.
    pub fn variables(&self) -> impl Iterator<Item = (&str, Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn callables(&self) -> impl Iterator<Item = &Callable> {
        self.callables.values().map(|c| &**c)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.variables.contains_key(name) || self.callables.contains_key(name)
    }

    /// An independent copy for one call. Callable bodies are shared, not copied.
    pub fn snapshot(&self) -> Environment {
        self.clone()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::{Param, ValueKind};
    use mira_ir::{NodeKind, Position, Span, SyntaxNode};

    fn callable(name: &str) -> Callable {
        Callable {
            name: name.to_string(),
            return_kind: ValueKind::Int,
            params: vec![Param {
                name: "n".to_string(),
                kind: ValueKind::Int,
            }],
            body: Rc::new(SyntaxNode::leaf(
                NodeKind::IntLiteral,
                "1",
                Span::new(0, 1),
                Position::START,
            )),
            position: Position::START,
        }
    }

    #[test]
    fn define_and_lookup() {
        let mut env = Environment::new();
        env.define_variable("x", Value::Int(10));
        assert_eq!(env.variable("x"), Some(Value::Int(10)));
        assert_eq!(env.variable("y"), None);
        assert!(env.is_defined("x"));
        assert!(!env.is_defined("y"));
    }

    #[test]
    fn variable_replaces_callable() {
        let mut env = Environment::new();
        env.define_callable(callable("f"));
        env.define_variable("f", Value::Num(1.5));
        assert!(env.callable("f").is_none());
        assert_eq!(env.variable("f"), Some(Value::Num(1.5)));
    }

    #[test]
    fn callable_replaces_variable() {
        let mut env = Environment::new();
        env.define_variable("f", Value::Int(3));
        env.define_callable(callable("f"));
        assert_eq!(env.variable("f"), None);
        assert_eq!(env.callable("f").unwrap().arity(), 1);
    }

    #[test]
    fn assignment_requires_a_variable() {
        let mut env = Environment::new();
        assert_eq!(
            env.assign_variable("x", Value::Int(1)),
            Err(AssignError::Undefined)
        );

        env.define_callable(callable("f"));
        assert_eq!(
            env.assign_variable("f", Value::Int(1)),
            Err(AssignError::NotAVariable)
        );

        env.define_variable("x", Value::Int(1));
        env.assign_variable("x", Value::Int(2)).unwrap();
        assert_eq!(env.variable("x"), Some(Value::Int(2)));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut env = Environment::new();
        env.define_variable("x", Value::Int(1));
        env.define_callable(callable("f"));

        let mut inner = env.snapshot();
        inner.define_variable("x", Value::Int(2));
        inner.define_variable("y", Value::Int(3));
        inner.define_variable("f", Value::Int(4));

        assert_eq!(env.variable("x"), Some(Value::Int(1)));
        assert_eq!(env.variable("y"), None);
        assert!(env.callable("f").is_some());
    }

    #[test]
    fn snapshot_shares_callable_bodies() {
        let mut env = Environment::new();
        env.define_callable(callable("f"));
        let inner = env.snapshot();
        assert!(Rc::ptr_eq(
            &env.callable("f").unwrap().body,
            &inner.callable("f").unwrap().body
        ));
    }

    #[test]
    fn variables_lists_bindings() {
        let mut env = Environment::new();
        env.define_variable("a", Value::Int(1));
        env.define_variable("b", Value::Num(2.0));
        env.define_callable(callable("f"));
        let mut vars: Vec<_> = env.variables().collect();
        vars.sort_by(|l, r| l.0.cmp(r.0));
        assert_eq!(vars, vec![("a", Value::Int(1)), ("b", Value::Num(2.0))]);
        assert_eq!(env.callables().count(), 1);
    }
}
