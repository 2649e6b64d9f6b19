//! Expression reduction.
//!
//! `atom`, `factor`, `term` and `expr` nodes are reduced against a borrowed
//! [`Environment`]. Every node shape is checked as it is reduced: a child of
//! the wrong kind, a stray token or a missing operand is a malformed-node
//! error, never a silent coercion.

mod call;

use mira_ir::{BinaryOp, Child, NodeKind, SyntaxNode};
use mira_stack::ensure_sufficient_stack;

use crate::diagnostics::CallStack;
use crate::errors::{malformed, undefined_variable, EvalResult};
use crate::operators::evaluate_binary;
use crate::{Environment, Value, ValueKind};

/// Evaluates expression nodes and tracks active calls.
pub struct Interpreter {
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    pub fn new(max_call_depth: Option<usize>) -> Self {
        Interpreter {
            call_stack: CallStack::new(max_call_depth),
        }
    }

    /// Reduce an expression node to a value.
    pub fn eval_node(&mut self, env: &Environment, node: &SyntaxNode) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_node_inner(env, node))
    }

    fn eval_node_inner(&mut self, env: &Environment, node: &SyntaxNode) -> EvalResult {
        match node.kind {
            NodeKind::Expr => self.reduce_chain(env, node, NodeKind::Term, BinaryOp::is_additive),
            NodeKind::Term => {
                self.reduce_chain(env, node, NodeKind::Factor, BinaryOp::is_multiplicative)
            }
            NodeKind::Factor => self.eval_factor(env, node),
            NodeKind::Atom => self.eval_atom(env, node),
            NodeKind::Call => self.eval_call(env, node),
            NodeKind::IntLiteral => eval_literal(node, ValueKind::Int),
            NodeKind::NumLiteral => eval_literal(node, ValueKind::Num),
            NodeKind::Identifier => eval_identifier(env, node),
            NodeKind::VarDefine
            | NodeKind::VarAssign
            | NodeKind::Echo
            | NodeKind::ParamList
            | NodeKind::CallableType
            | NodeKind::CallableDefine
            | NodeKind::ArgList
            | NodeKind::Newline => Err(malformed(node.kind, "an expression").at(node)),
        }
    }

    /// `operand (op operand)*`, folded left to right.
    fn reduce_chain(
        &mut self,
        env: &Environment,
        node: &SyntaxNode,
        operand: NodeKind,
        is_op: fn(BinaryOp) -> bool,
    ) -> EvalResult {
        let mut children = node.children.iter();
        let Some(first) = children.next() else {
            return Err(malformed(node.kind, format!("`{operand}`")).at(node));
        };
        let mut acc = self.eval_operand(env, node, first, operand)?;

        while let Some(op_child) = children.next() {
            let op = op_child
                .as_token()
                .and_then(BinaryOp::from_symbol)
                .filter(|op| is_op(*op))
                .ok_or_else(|| malformed(node.kind, "an operator").at(node))?;
            let Some(rhs_child) = children.next() else {
                return Err(malformed(node.kind, format!("`{operand}` after `{op}`")).at(node));
            };
            let rhs = self.eval_operand(env, node, rhs_child, operand)?;
            acc = evaluate_binary(acc, rhs, op).map_err(|e| e.at(node))?;
        }

        Ok(acc)
    }

    fn eval_operand(
        &mut self,
        env: &Environment,
        parent: &SyntaxNode,
        child: &Child,
        kind: NodeKind,
    ) -> EvalResult {
        match child.as_node_of(kind) {
            Some(operand) => self.eval_node(env, operand),
            None => Err(malformed(parent.kind, format!("`{kind}`")).at(parent)),
        }
    }

    /// `atom` or `atom "^" factor`, the exponent nesting to the right.
    fn eval_factor(&mut self, env: &Environment, node: &SyntaxNode) -> EvalResult {
        match node.children.as_slice() {
            [base] => self.eval_operand(env, node, base, NodeKind::Atom),
            [base, Child::Token(caret), exp] if caret == "^" => {
                let base = self.eval_operand(env, node, base, NodeKind::Atom)?;
                let exp = self.eval_operand(env, node, exp, NodeKind::Factor)?;
                evaluate_binary(base, exp, BinaryOp::Exp).map_err(|e| e.at(node))
            }
            [] => Err(malformed(NodeKind::Factor, "an atom").at(node)),
            _ => Err(malformed(NodeKind::Factor, "`atom` or `atom ^ factor`").at(node)),
        }
    }

    /// A single literal, identifier or call, or a parenthesized expression.
    fn eval_atom(&mut self, env: &Environment, node: &SyntaxNode) -> EvalResult {
        match node.children.as_slice() {
            [Child::Node(inner)]
                if matches!(
                    inner.kind,
                    NodeKind::Call | NodeKind::IntLiteral | NodeKind::NumLiteral | NodeKind::Identifier
                ) =>
            {
                self.eval_node(env, inner)
            }
            [open, inner, close] if open.is_token("(") && close.is_token(")") => {
                self.eval_operand(env, node, inner, NodeKind::Expr)
            }
            [first, ..] if first.is_token("(") => {
                Err(malformed(NodeKind::Atom, "`(` expr `)`").at(node))
            }
            [] => Err(malformed(NodeKind::Atom, "a literal, identifier or call").at(node)),
            _ => Err(malformed(NodeKind::Atom, "a single literal, identifier or call").at(node)),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(None)
    }
}

fn eval_literal(node: &SyntaxNode, kind: ValueKind) -> EvalResult {
    let Some(text) = node.leaf_text() else {
        return Err(malformed(node.kind, "literal text").at(node));
    };
    Value::parse_literal(kind, text).map_err(|e| e.at(node))
}

fn eval_identifier(env: &Environment, node: &SyntaxNode) -> EvalResult {
    let Some(name) = node.ident_text() else {
        return Err(malformed(NodeKind::Identifier, "a name").at(node));
    };
    env.variable(name).ok_or_else(|| {
        let err = undefined_variable(name).at(node);
        if env.callable(name).is_some() {
            err.with_note(format!("`{name}` is a callable; call it as `{name}(...)`"))
        } else {
            err
        }
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
