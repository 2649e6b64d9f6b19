//! Top-level program execution.
//!
//! An [`Evaluator`] owns one persistent [`Environment`] and executes
//! statements against it in order. Successive calls to
//! [`execute`](Evaluator::execute) share that environment, so a front end
//! can feed it one line at a time.

mod builder;
mod statements;

pub use builder::{EvaluatorBuilder, DEFAULT_MAX_CALL_DEPTH};

use mira_ir::{NodeKind, SyntaxNode};
use tracing::trace;

use crate::errors::{malformed, EvalError};
use crate::interpreter::Interpreter;
use crate::{Environment, SharedPrintHandler, Value};

/// Executes parsed programs against a persistent environment.
pub struct Evaluator {
    env: Environment,
    pub(crate) interpreter: Interpreter,
    print_handler: SharedPrintHandler,
}

impl Evaluator {
    /// An evaluator with default settings.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Execute statements in order.
    ///
    /// Returns the value of the last statement that produced one, or `None`
    /// if none did. The first error stops execution; bindings made by
    /// earlier statements are kept.
    pub fn execute(
        &mut self,
        nodes: impl IntoIterator<Item = SyntaxNode>,
    ) -> Result<Option<Value>, EvalError> {
        let mut last = None;
        for node in nodes {
            if let Some(value) = self.execute_statement(node)? {
                last = Some(value);
            }
        }
        Ok(last)
    }

    fn execute_statement(&mut self, node: SyntaxNode) -> Result<Option<Value>, EvalError> {
        trace!(kind = %node.kind, line = node.position.line, "execute");
        match node.kind {
            NodeKind::Newline => Ok(None),
            NodeKind::VarDefine => self.define_variable(&node).map(Some),
            NodeKind::VarAssign => self.assign_variable(&node).map(Some),
            NodeKind::Echo => self.echo(&node).map(Some),
            NodeKind::CallableDefine => self.define_callable(node).map(|()| None),
            NodeKind::Expr
            | NodeKind::Term
            | NodeKind::Factor
            | NodeKind::Atom
            | NodeKind::Call
            | NodeKind::IntLiteral
            | NodeKind::NumLiteral
            | NodeKind::Identifier => self.interpreter.eval_node(&self.env, &node).map(Some),
            NodeKind::ParamList | NodeKind::CallableType | NodeKind::ArgList => {
                Err(malformed(node.kind, "a statement").at(&node))
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
