//! Statement forms: definitions, assignment and echo.
//!
//! Each statement validates its shape and computes its value before touching
//! the environment, so a failing statement binds nothing.

use std::rc::Rc;

use mira_ir::{Child, NodeKind, SyntaxNode};
use tracing::debug;

use super::Evaluator;
use crate::errors::{
    duplicate_parameter, malformed, undefined_variable, unknown_type, EvalError, EvalResult,
};
use crate::{Callable, Param, ValueKind};

/// Identifier text of `child`, or a malformed-node error against `parent`.
fn ident<'a>(parent: &SyntaxNode, child: &'a Child, what: &str) -> Result<&'a str, EvalError> {
    child
        .as_node_of(NodeKind::Identifier)
        .and_then(SyntaxNode::ident_text)
        .ok_or_else(|| malformed(parent.kind, what.to_string()).at(parent))
}

/// Resolve a type name written in `child`.
fn type_name(parent: &SyntaxNode, child: &Child) -> Result<ValueKind, EvalError> {
    let name = ident(parent, child, "a type name")?;
    ValueKind::from_name(name).ok_or_else(|| {
        let err = unknown_type(name);
        match child.as_node() {
            Some(node) => err.at(node),
            None => err.at(parent),
        }
    })
}

fn expr_child<'a>(parent: &SyntaxNode, child: &'a Child) -> Result<&'a SyntaxNode, EvalError> {
    child
        .as_node_of(NodeKind::Expr)
        .ok_or_else(|| malformed(parent.kind, "an expression").at(parent))
}

impl Evaluator {
    /// `name ":" type "=" expr` or `name ":" "=" expr`
    pub(super) fn define_variable(&mut self, node: &SyntaxNode) -> EvalResult {
        let (name, declared, value) = match node.children.as_slice() {
            [name, colon, ty, eq, value] if colon.is_token(":") && eq.is_token("=") => (
                ident(node, name, "a variable name")?,
                Some(type_name(node, ty)?),
                expr_child(node, value)?,
            ),
            [name, colon, eq, value] if colon.is_token(":") && eq.is_token("=") => (
                ident(node, name, "a variable name")?,
                None,
                expr_child(node, value)?,
            ),
            _ => return Err(malformed(NodeKind::VarDefine, "`name : type = expr`").at(node)),
        };

        let computed = self.interpreter.eval_node(&self.env, value)?;
        let value = match declared {
            Some(kind) => computed.coerce_to(kind).map_err(|e| e.at(value))?,
            None => computed,
        };

        debug!(name, kind = %value.kind(), %value, "define variable");
        self.env.define_variable(name, value);
        Ok(value)
    }

    /// `name "=" expr`, keeping the variable's kind.
    pub(super) fn assign_variable(&mut self, node: &SyntaxNode) -> EvalResult {
        let [name_child, eq, value] = node.children.as_slice() else {
            return Err(malformed(NodeKind::VarAssign, "`name = expr`").at(node));
        };
        if !eq.is_token("=") {
            return Err(malformed(NodeKind::VarAssign, "`=` after the name").at(node));
        }
        let name = ident(node, name_child, "a variable name")?;
        let value_node = expr_child(node, value)?;

        let Some(current) = self.env.variable(name) else {
            let err = undefined_variable(name).at(node);
            return Err(if self.env.callable(name).is_some() {
                err.with_note(format!("`{name}` is a callable and cannot be assigned"))
            } else {
                err.with_note(format!("define it first with `{name}: = ...`"))
            });
        };

        let value = self
            .interpreter
            .eval_node(&self.env, value_node)?
            .coerce_to(current.kind())
            .map_err(|e| e.at(value_node))?;

        // Existence was checked above and evaluation cannot rebind names.
        if self.env.assign_variable(name, value).is_err() {
            return Err(undefined_variable(name).at(node));
        }
        debug!(name, %value, "assign");
        Ok(value)
    }

    /// `"echo" expr`: one line of output, and the value as the result.
    pub(super) fn echo(&mut self, node: &SyntaxNode) -> EvalResult {
        let [keyword, value] = node.children.as_slice() else {
            return Err(malformed(NodeKind::Echo, "`echo expr`").at(node));
        };
        if !keyword.is_token("echo") {
            return Err(malformed(NodeKind::Echo, "the `echo` keyword").at(node));
        }
        let value = self.interpreter.eval_node(&self.env, expr_child(node, value)?)?;
        debug!(%value, "echo");
        self.print_handler.println(&value.to_string());
        Ok(value)
    }

    /// `name ":" ret "(" params ")" "=" expr`
    ///
    /// Takes the node by value: the body moves into the callable.
    pub(super) fn define_callable(&mut self, mut node: SyntaxNode) -> Result<(), EvalError> {
        let (span, position) = (node.span, node.position);
        let located = |mut err: EvalError| {
            if err.position.is_none() {
                err.span = Some(span);
                err.position = Some(position);
            }
            err
        };

        let Ok([name, colon, signature, eq, body]) = <[Child; 5]>::try_from(node.take_children()) else {
            return Err(located(malformed(
                NodeKind::CallableDefine,
                "`name : type ( params ) = expr`",
            )));
        };
        if !colon.is_token(":") || !eq.is_token("=") {
            return Err(located(malformed(
                NodeKind::CallableDefine,
                "`:` after the name and `=` before the body",
            )));
        }
        let name = name
            .as_node_of(NodeKind::Identifier)
            .and_then(SyntaxNode::ident_text)
            .map(str::to_string)
            .ok_or_else(|| located(malformed(NodeKind::CallableDefine, "a callable name")))?;
        let Some(signature) = signature.as_node_of(NodeKind::CallableType) else {
            return Err(located(malformed(NodeKind::CallableDefine, "a callable signature")));
        };
        let (return_kind, params) = signature_parts(&name, signature)?;
        let body = match body.into_node() {
            Some(body) if body.kind == NodeKind::Expr => body,
            _ => return Err(located(malformed(NodeKind::CallableDefine, "a body expression"))),
        };

        debug!(
            name = %name,
            return_kind = %return_kind,
            arity = params.len(),
            "define callable"
        );
        self.env.define_callable(Callable {
            name,
            return_kind,
            params,
            body: Rc::new(body),
            position,
        });
        Ok(())
    }
}

/// `ret "(" paramlist ")"`, validating every type name and parameter name.
fn signature_parts(
    callable: &str,
    node: &SyntaxNode,
) -> Result<(ValueKind, Vec<Param>), EvalError> {
    let [ret, open, params, close] = node.children.as_slice() else {
        return Err(malformed(NodeKind::CallableType, "`type ( params )`").at(node));
    };
    if !open.is_token("(") || !close.is_token(")") {
        return Err(malformed(NodeKind::CallableType, "parentheses around the parameters").at(node));
    }
    let return_kind = type_name(node, ret)?;
    let Some(params) = params.as_node_of(NodeKind::ParamList) else {
        return Err(malformed(NodeKind::CallableType, "a parameter list").at(node));
    };
    Ok((return_kind, param_list(callable, params)?))
}

/// Flat `name ":" type [","]` groups.
fn param_list(callable: &str, node: &SyntaxNode) -> Result<Vec<Param>, EvalError> {
    let mut params: Vec<Param> = Vec::new();
    let mut children = node.children.iter().peekable();

    while let Some(name_child) = children.next() {
        let (Some(colon), Some(ty)) = (children.next(), children.next()) else {
            return Err(malformed(NodeKind::ParamList, "`name : type` pairs").at(node));
        };
        if !colon.is_token(":") {
            return Err(malformed(NodeKind::ParamList, "`:` after the parameter name").at(node));
        }
        let name = ident(node, name_child, "a parameter name")?;
        let kind = type_name(node, ty)?;

        if params.iter().any(|p| p.name == name) {
            let err = duplicate_parameter(callable, name);
            return Err(match name_child.as_node() {
                Some(name_node) => err.at(name_node),
                None => err.at(node),
            });
        }
        params.push(Param {
            name: name.to_string(),
            kind,
        });

        if children.peek().is_some_and(|c| c.is_token(",")) {
            children.next();
        }
    }

    Ok(params)
}
