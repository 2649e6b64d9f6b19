mod parser_tests;

use mira_ir::{NodeKind, SyntaxNode};

use crate::parse;

/// Parse and render every node as an s-expression, one per line.
fn sexp(source: &str) -> String {
    parse(source)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a single-statement program.
fn parse_one(source: &str) -> SyntaxNode {
    let mut nodes: Vec<SyntaxNode> = parse(source)
        .unwrap()
        .into_iter()
        .filter(|n| n.kind != NodeKind::Newline)
        .collect();
    assert_eq!(nodes.len(), 1, "expected one statement in {source:?}");
    nodes.remove(0)
}
