//! User-defined callables.

use std::rc::Rc;

use mira_ir::{Position, SyntaxNode};

use crate::ValueKind;

/// A declared parameter: `name: kind`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ValueKind,
}

/// A named, typed function with an immutable body expression.
///
/// The body is shared by every call and every environment snapshot that
/// holds this callable; evaluation never mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Callable {
    pub name: String,
    pub return_kind: ValueKind,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    pub body: Rc<SyntaxNode>,
    /// Where the definition starts.
    pub position: Position,
}

impl Callable {
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
