//! Callable invocation.

use mira_ir::{NodeKind, SyntaxNode};
use mira_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{argument_mismatch, malformed, undefined_function, EvalError, EvalResult};
use crate::{Callable, Environment, Value};

/// One `name = expr` argument of a call.
struct Argument<'a> {
    name: &'a str,
    value: &'a SyntaxNode,
}

impl Interpreter {
    /// `name "(" arglist ")"`
    ///
    /// Arguments are evaluated left to right in the caller's environment;
    /// the body runs against a snapshot of it.
    pub(super) fn eval_call(&mut self, env: &Environment, node: &SyntaxNode) -> EvalResult {
        let (name, args) = call_parts(node)?;

        let Some(callable) = env.callable(name) else {
            let err = undefined_function(name).at(node);
            return Err(if env.variable(name).is_some() {
                err.with_note(format!("`{name}` is a variable, not a callable"))
            } else {
                err
            });
        };
        check_arguments(&callable, &args).map_err(|e| e.at(node))?;

        let mut values = Vec::with_capacity(args.len());
        for arg in &args {
            values.push((arg, self.eval_node(env, arg.value)?));
        }

        let frame = CallFrame::new(name, node.span, node.position);
        let note = frame.note();
        self.call_stack.push(frame)?;
        let result = ensure_sufficient_stack(|| self.invoke(env, &callable, values));
        self.call_stack.pop();

        result.map_err(|err| {
            if self.call_stack.is_empty() {
                err.with_note(note)
            } else {
                err
            }
        })
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(name = %callable.name, depth = self.call_stack.depth())
    )]
    fn invoke(
        &mut self,
        env: &Environment,
        callable: &Callable,
        args: Vec<(&Argument<'_>, Value)>,
    ) -> EvalResult {
        let mut scope = env.snapshot();
        for (arg, value) in args {
            // Names were matched against the parameters before the call.
            let Some(param) = callable.param(arg.name) else {
                return Err(malformed(NodeKind::ArgList, "a declared parameter").at(arg.value));
            };
            let value = value.coerce_to(param.kind).map_err(|e| e.at(arg.value))?;
            scope.define_variable(arg.name, value);
        }

        let result = self.eval_node(&scope, &callable.body)?;
        tracing::trace!(%result, "returned");
        result
            .coerce_to(callable.return_kind)
            .map_err(|e| e.at(&callable.body))
    }
}

/// Split a call node into its name and arguments.
fn call_parts(node: &SyntaxNode) -> Result<(&str, Vec<Argument<'_>>), EvalError> {
    let [name, open, args, close] = node.children.as_slice() else {
        return Err(malformed(NodeKind::Call, "`name ( arglist )`").at(node));
    };
    let (Some(name), Some(args)) = (
        name.as_node_of(NodeKind::Identifier).and_then(SyntaxNode::ident_text),
        args.as_node_of(NodeKind::ArgList),
    ) else {
        return Err(malformed(NodeKind::Call, "a callable name and argument list").at(node));
    };
    if !open.is_token("(") || !close.is_token(")") {
        return Err(malformed(NodeKind::Call, "parentheses around the arguments").at(node));
    }
    Ok((name, arg_list(args)?))
}

/// Group a flat `ident "=" expr [","]` sequence.
fn arg_list(node: &SyntaxNode) -> Result<Vec<Argument<'_>>, EvalError> {
    let mut args = Vec::new();
    let mut children = node.children.iter().peekable();

    while let Some(name) = children.next() {
        let name = name
            .as_node_of(NodeKind::Identifier)
            .and_then(SyntaxNode::ident_text);
        let eq = children.next();
        let value = children.next().and_then(|c| c.as_node_of(NodeKind::Expr));
        let (Some(name), Some(eq), Some(value)) = (name, eq, value) else {
            return Err(malformed(NodeKind::ArgList, "`name = expr` pairs").at(node));
        };
        if !eq.is_token("=") {
            return Err(malformed(NodeKind::ArgList, "`=` after the argument name").at(node));
        }
        args.push(Argument { name, value });

        if children.peek().is_some_and(|c| c.is_token(",")) {
            children.next();
        }
    }

    Ok(args)
}

/// Argument names must be exactly the parameter names.
fn check_arguments(callable: &Callable, args: &[Argument<'_>]) -> Result<(), EvalError> {
    let missing: Vec<String> = callable
        .param_names()
        .filter(|param| !args.iter().any(|arg| arg.name == *param))
        .map(str::to_string)
        .collect();
    let extra: Vec<String> = args
        .iter()
        .filter(|arg| callable.param(arg.name).is_none())
        .map(|arg| arg.name.to_string())
        .collect();

    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(argument_mismatch(&callable.name, missing, extra))
    }
}
