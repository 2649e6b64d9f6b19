use mira_ir::{Child, NodeKind, Position, Span};
use pretty_assertions::assert_eq;

use super::{parse_one, sexp};
use crate::parse;

#[test]
fn empty_program() {
    assert!(parse("").unwrap().is_empty());
}

#[test]
fn blank_lines_become_newline_nodes() {
    let nodes = parse("\n\n").unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n.kind == NodeKind::Newline));
    assert_eq!(nodes[1].position, Position::new(2, 1));
}

#[test]
fn integer_literal() {
    assert_eq!(sexp("42"), r#"(expr (term (factor (atom (int-literal "42")))))"#);
}

#[test]
fn number_literals() {
    assert_eq!(
        sexp("123."),
        r#"(expr (term (factor (atom (num-literal "123.")))))"#
    );
    assert_eq!(
        sexp("2e-3"),
        r#"(expr (term (factor (atom (num-literal "2e-3")))))"#
    );
}

#[test]
fn additive_chain_is_flat() {
    assert_eq!(
        sexp("1 + 2 - 3"),
        concat!(
            r#"(expr (term (factor (atom (int-literal "1")))) "+" "#,
            r#"(term (factor (atom (int-literal "2")))) "-" "#,
            r#"(term (factor (atom (int-literal "3")))))"#
        )
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        sexp("1 + 2 * 3"),
        concat!(
            r#"(expr (term (factor (atom (int-literal "1")))) "+" "#,
            r#"(term (factor (atom (int-literal "2"))) "*" (factor (atom (int-literal "3")))))"#
        )
    );
}

#[test]
fn exponent_nests_to_the_right() {
    assert_eq!(
        sexp("2 ^ 3 ^ 2"),
        concat!(
            r#"(expr (term (factor (atom (int-literal "2")) "^" "#,
            r#"(factor (atom (int-literal "3")) "^" (factor (atom (int-literal "2")))))))"#
        )
    );
}

#[test]
fn parenthesized_atom() {
    let stmt = parse_one("(1 + 2) * 3");
    let term = stmt.children[0].as_node().unwrap();
    let factor = term.children[0].as_node().unwrap();
    let atom = factor.children[0].as_node().unwrap();
    assert_eq!(atom.kind, NodeKind::Atom);
    assert_eq!(atom.children.len(), 3);
    assert!(atom.children[0].is_token("("));
    assert_eq!(atom.children[1].as_node().unwrap().kind, NodeKind::Expr);
    assert!(atom.children[2].is_token(")"));
    assert_eq!(atom.span, Span::new(0, 7));
}

#[test]
fn sign_folds_into_adjacent_literal() {
    assert_eq!(
        sexp("18 * -47"),
        r#"(expr (term (factor (atom (int-literal "18"))) "*" (factor (atom (int-literal "-47")))))"#
    );
    assert_eq!(
        sexp("+2.5"),
        r#"(expr (term (factor (atom (num-literal "+2.5")))))"#
    );
}

#[test]
fn sign_after_operand_is_subtraction() {
    for source in ["5 -3", "5-3", "5 - 3"] {
        assert_eq!(
            sexp(source),
            r#"(expr (term (factor (atom (int-literal "5")))) "-" (term (factor (atom (int-literal "3")))))"#,
            "{source}"
        );
    }
}

#[test]
fn subtracting_a_negative_literal() {
    assert_eq!(
        sexp("5--3"),
        r#"(expr (term (factor (atom (int-literal "5")))) "-" (term (factor (atom (int-literal "-3")))))"#
    );
}

#[test]
fn precedence_example_parses() {
    let stmt = parse_one("(5 ^ -9) + 5 ^ (3 + 2 * 7^2) - 18 * -47");
    assert_eq!(stmt.kind, NodeKind::Expr);
    // term "+" term "-" term
    assert_eq!(stmt.children.len(), 5);
    assert!(stmt.children[1].is_token("+"));
    assert!(stmt.children[3].is_token("-"));
}

#[test]
fn echo_statement() {
    assert_eq!(
        sexp("echo x"),
        r#"(echo "echo" (expr (term (factor (atom (identifier "x"))))))"#
    );
}

#[test]
fn echo_prefix_is_an_identifier() {
    assert_eq!(
        sexp("echox"),
        r#"(expr (term (factor (atom (identifier "echox")))))"#
    );
}

#[test]
fn explicit_variable_definition() {
    assert_eq!(
        sexp("x: int = 10"),
        r#"(var-define (identifier "x") ":" (identifier "int") "=" (expr (term (factor (atom (int-literal "10"))))))"#
    );
}

#[test]
fn implicit_variable_definition() {
    assert_eq!(
        sexp("x: = 1.5"),
        r#"(var-define (identifier "x") ":" "=" (expr (term (factor (atom (num-literal "1.5"))))))"#
    );
}

#[test]
fn variable_assignment() {
    assert_eq!(
        sexp("x = 5.0"),
        r#"(var-assign (identifier "x") "=" (expr (term (factor (atom (num-literal "5.0"))))))"#
    );
}

#[test]
fn callable_definition() {
    let stmt = parse_one("add: int(a: int, b: num) = a + b");
    assert_eq!(stmt.kind, NodeKind::CallableDefine);
    assert_eq!(stmt.children.len(), 5);
    assert_eq!(stmt.children[0].as_node().unwrap().ident_text(), Some("add"));

    let signature = stmt.children[2].as_node_of(NodeKind::CallableType).unwrap();
    assert_eq!(signature.children[0].as_node().unwrap().ident_text(), Some("int"));
    assert_eq!(
        signature.children[2].as_node().unwrap().to_string(),
        r#"(param-list (identifier "a") ":" (identifier "int") "," (identifier "b") ":" (identifier "num"))"#
    );
    assert_eq!(stmt.children[4].as_node().unwrap().kind, NodeKind::Expr);
}

#[test]
fn callable_without_parameters() {
    let stmt = parse_one("one: int() = 1");
    let signature = stmt.children[2].as_node().unwrap();
    assert_eq!(
        signature.to_string(),
        r#"(callable-type (identifier "int") "(" (param-list) ")")"#
    );
}

#[test]
fn parameter_list_trailing_comma() {
    let stmt = parse_one("f: num(a: int,) = a");
    let params = stmt.children[2].as_node().unwrap().children[2]
        .as_node()
        .unwrap();
    assert_eq!(params.children.len(), 4);
    assert!(params.children[3].is_token(","));
}

#[test]
fn call_with_arguments() {
    assert_eq!(
        sexp("f(a = 1, b = x)"),
        concat!(
            r#"(expr (term (factor (atom (call (identifier "f") "(" "#,
            r#"(arg-list (identifier "a") "=" (expr (term (factor (atom (int-literal "1"))))) "," "#,
            r#"(identifier "b") "=" (expr (term (factor (atom (identifier "x")))))) ")")))))"#
        )
    );
}

#[test]
fn call_without_arguments() {
    assert_eq!(
        sexp("f()"),
        r#"(expr (term (factor (atom (call (identifier "f") "(" (arg-list) ")")))))"#
    );
}

#[test]
fn nested_calls_in_arguments() {
    let stmt = parse_one("f(a = g(b = 2,),)");
    let call = stmt.children[0].as_node().unwrap().children[0]
        .as_node()
        .unwrap()
        .children[0]
        .as_node()
        .unwrap()
        .children[0]
        .as_node_of(NodeKind::Call)
        .unwrap();
    let args = call.children[2].as_node_of(NodeKind::ArgList).unwrap();
    assert_eq!(args.children.len(), 4);
    assert!(matches!(args.children[3], Child::Token(ref t) if t == ","));
}

#[test]
fn statements_are_separated_by_newlines() {
    let kinds: Vec<NodeKind> = parse("x: int = 10\nx = 5\n\necho x\n")
        .unwrap()
        .iter()
        .map(|n| n.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::VarDefine,
            NodeKind::Newline,
            NodeKind::VarAssign,
            NodeKind::Newline,
            NodeKind::Newline,
            NodeKind::Echo,
            NodeKind::Newline,
        ]
    );
}

#[test]
fn positions_track_lines_and_columns() {
    let nodes = parse("x: int = 10\n\n  echo x + 1").unwrap();
    assert_eq!(nodes[0].position, Position::new(1, 1));
    assert_eq!(nodes[1].position, Position::new(1, 12));
    assert_eq!(nodes[2].position, Position::new(2, 1));
    assert_eq!(nodes[3].position, Position::new(3, 3));

    // echo -> expr -> term "+" term: the second term starts at column 12
    let expr = nodes[3].children[1].as_node().unwrap();
    assert_eq!(expr.children[2].as_node().unwrap().position, Position::new(3, 12));
}

#[test]
fn comments_do_not_produce_nodes() {
    let nodes = parse("# header\nx: int = 1 # trailing\n## block\ncomment ##\necho x").unwrap();
    let kinds: Vec<NodeKind> = nodes.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Newline,
            NodeKind::VarDefine,
            NodeKind::Newline,
            NodeKind::Newline,
            NodeKind::Echo,
        ]
    );
    assert_eq!(nodes[4].position, Position::new(5, 1));
}

#[test]
fn whitespace_does_not_change_structure() {
    let tight = parse_one("x:int=2^3*(1+f(a=1))");
    let loose = parse_one("x : int = 2 ^ 3 * ( 1 + f ( a = 1 ) )");
    assert!(tight.same_structure(&loose));
    assert_ne!(tight, loose);
}
