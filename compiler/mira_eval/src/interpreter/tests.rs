use mira_ir::{Child, NodeKind, Position, Span, SyntaxNode};
use pretty_assertions::assert_eq;

use super::Interpreter;
use crate::errors::EvalErrorKind;
use crate::{Environment, Value};

fn node(kind: NodeKind, children: Vec<Child>) -> SyntaxNode {
    SyntaxNode::new(kind, children, Span::new(0, 1), Position::START)
}

fn int(text: &str) -> SyntaxNode {
    SyntaxNode::leaf(NodeKind::IntLiteral, text, Span::new(0, 1), Position::START)
}

fn tok(text: &str) -> Child {
    Child::Token(text.to_string())
}

/// `atom -> factor -> term -> expr` around a literal.
fn wrap(literal: SyntaxNode) -> SyntaxNode {
    let atom = node(NodeKind::Atom, vec![Child::Node(literal)]);
    let factor = node(NodeKind::Factor, vec![Child::Node(atom)]);
    let term = node(NodeKind::Term, vec![Child::Node(factor)]);
    node(NodeKind::Expr, vec![Child::Node(term)])
}

fn eval(node: &SyntaxNode) -> Result<Value, EvalErrorKind> {
    Interpreter::default()
        .eval_node(&Environment::new(), node)
        .map_err(|e| e.kind)
}

fn malformed(construct: NodeKind) -> impl Fn(&EvalErrorKind) -> bool {
    move |kind: &EvalErrorKind| matches!(kind, EvalErrorKind::Malformed { construct: c, .. } if *c == construct)
}

#[test]
fn well_formed_chain() {
    let expr = wrap(int("6"));
    assert_eq!(eval(&expr).unwrap(), Value::Int(6));
}

#[test]
fn empty_nodes_are_malformed() {
    for kind in [NodeKind::Expr, NodeKind::Term, NodeKind::Factor, NodeKind::Atom] {
        let err = eval(&node(kind, vec![])).unwrap_err();
        assert!(malformed(kind)(&err), "{kind}: {err:?}");
    }
}

#[test]
fn chain_operand_of_wrong_kind() {
    // An expr must hold terms, not factors.
    let factor = node(
        NodeKind::Factor,
        vec![Child::Node(node(NodeKind::Atom, vec![Child::Node(int("1"))]))],
    );
    let expr = node(NodeKind::Expr, vec![Child::Node(factor)]);
    let err = eval(&expr).unwrap_err();
    assert_eq!(
        err,
        EvalErrorKind::Malformed {
            construct: NodeKind::Expr,
            expected: "`term`".to_string()
        }
    );
}

#[test]
fn chain_operator_out_of_place() {
    // `*` between the terms of an expr.
    let term = wrap(int("2")).children.remove(0).into_node().unwrap();
    let expr = node(
        NodeKind::Expr,
        vec![Child::Node(term.clone()), tok("*"), Child::Node(term)],
    );
    assert!(malformed(NodeKind::Expr)(&eval(&expr).unwrap_err()));
}

#[test]
fn chain_missing_right_operand() {
    let term = wrap(int("2")).children.remove(0).into_node().unwrap();
    let expr = node(NodeKind::Expr, vec![Child::Node(term), tok("+")]);
    assert_eq!(
        eval(&expr).unwrap_err(),
        EvalErrorKind::Malformed {
            construct: NodeKind::Expr,
            expected: "`term` after `+`".to_string()
        }
    );
}

#[test]
fn factor_exponent_must_be_a_factor() {
    let atom = || Child::Node(node(NodeKind::Atom, vec![Child::Node(int("2"))]));
    let bad = node(NodeKind::Factor, vec![atom(), tok("^"), atom()]);
    assert_eq!(
        eval(&bad).unwrap_err(),
        EvalErrorKind::Malformed {
            construct: NodeKind::Factor,
            expected: "`factor`".to_string()
        }
    );

    let good = node(
        NodeKind::Factor,
        vec![
            atom(),
            tok("^"),
            Child::Node(node(NodeKind::Factor, vec![atom()])),
        ],
    );
    assert_eq!(eval(&good).unwrap(), Value::Int(4));
}

#[test]
fn paren_atom_needs_three_children() {
    let inner = Child::Node(wrap(int("3")));
    let unclosed = node(NodeKind::Atom, vec![tok("("), inner.clone()]);
    assert_eq!(
        eval(&unclosed).unwrap_err(),
        EvalErrorKind::Malformed {
            construct: NodeKind::Atom,
            expected: "`(` expr `)`".to_string()
        }
    );

    let group = node(NodeKind::Atom, vec![tok("("), inner, tok(")")]);
    assert_eq!(eval(&group).unwrap(), Value::Int(3));
}

#[test]
fn atom_with_two_literals() {
    let atom = node(
        NodeKind::Atom,
        vec![Child::Node(int("1")), Child::Node(int("2"))],
    );
    assert!(malformed(NodeKind::Atom)(&eval(&atom).unwrap_err()));
}

#[test]
fn statements_are_not_expressions() {
    let echo = node(NodeKind::Echo, vec![tok("echo"), Child::Node(wrap(int("1")))]);
    assert_eq!(
        eval(&echo).unwrap_err(),
        EvalErrorKind::Malformed {
            construct: NodeKind::Echo,
            expected: "an expression".to_string()
        }
    );
}

#[test]
fn malformed_call() {
    let call = node(
        NodeKind::Call,
        vec![Child::Node(SyntaxNode::leaf(
            NodeKind::Identifier,
            "f",
            Span::new(0, 1),
            Position::START,
        ))],
    );
    assert!(malformed(NodeKind::Call)(&eval(&call).unwrap_err()));
}

#[test]
fn errors_are_located_at_the_innermost_node() {
    let ident = SyntaxNode::leaf(
        NodeKind::Identifier,
        "ghost",
        Span::new(8, 13),
        Position::new(2, 3),
    );
    let err = Interpreter::default()
        .eval_node(&Environment::new(), &wrap(ident))
        .unwrap_err();
    assert_eq!(err.position, Some(Position::new(2, 3)));
    assert_eq!(err.span, Some(Span::new(8, 13)));
}
