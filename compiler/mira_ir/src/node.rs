//! Syntax tree produced by the parser.
//!
//! The tree mirrors the grammar: every node records the production that
//! built it ([`NodeKind`]) and the exact sequence of pieces it matched
//! ([`Child`]), including punctuation. Nodes are never mutated after parsing.
//!
//! Shapes by kind:
//!
//! | kind              | children                                          |
//! |-------------------|---------------------------------------------------|
//! | int/num/ident     | `["text"]`                                        |
//! | `newline`         | `["\n"]`                                          |
//! | `atom`            | `[call \| literal \| ident]` or `["(", expr, ")"]` |
//! | `factor`          | `[atom]` or `[atom, "^", factor]`                 |
//! | `term`            | `[factor, ("*" \| "/", factor)*]`                 |
//! | `expr`            | `[term, ("+" \| "-", term)*]`                     |
//! | `var-define`      | `[ident, ":", ident, "=", expr]` or `[ident, ":", "=", expr]` |
//! | `var-assign`      | `[ident, "=", expr]`                              |
//! | `echo`            | `["echo", expr]`                                  |
//! | `callable-define` | `[ident, ":", callable-type, "=", expr]`          |
//! | `callable-type`   | `[ident, "(", param-list, ")"]`                   |
//! | `param-list`      | `[ident, ":", ident, (",")?]*`                    |
//! | `call`            | `[ident, "(", arg-list, ")"]`                     |
//! | `arg-list`        | `[ident, "=", expr, (",")?]*`                     |

use super::{Position, Span};
use mira_stack::ensure_sufficient_stack;
use std::fmt;

/// The grammar production a [`SyntaxNode`] was built from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    IntLiteral,
    NumLiteral,
    Identifier,
    Atom,
    Factor,
    Term,
    Expr,
    VarDefine,
    VarAssign,
    Echo,
    ParamList,
    CallableType,
    CallableDefine,
    ArgList,
    Call,
    Newline,
}

impl NodeKind {
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::IntLiteral => "int-literal",
            NodeKind::NumLiteral => "num-literal",
            NodeKind::Identifier => "identifier",
            NodeKind::Atom => "atom",
            NodeKind::Factor => "factor",
            NodeKind::Term => "term",
            NodeKind::Expr => "expr",
            NodeKind::VarDefine => "var-define",
            NodeKind::VarAssign => "var-assign",
            NodeKind::Echo => "echo",
            NodeKind::ParamList => "param-list",
            NodeKind::CallableType => "callable-type",
            NodeKind::CallableDefine => "callable-define",
            NodeKind::ArgList => "arg-list",
            NodeKind::Call => "call",
            NodeKind::Newline => "newline",
        }
    }

    /// Leaf kinds hold a single token child and nothing else.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::IntLiteral | NodeKind::NumLiteral | NodeKind::Identifier | NodeKind::Newline
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One element of a node's children.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Node(SyntaxNode),
    /// Raw token text: punctuation, operators, keywords, literal text.
    Token(String),
}

impl Child {
    #[inline]
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    /// The child as a node of exactly `kind`.
    #[inline]
    pub fn as_node_of(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.as_node().filter(|node| node.kind == kind)
    }

    #[inline]
    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    #[inline]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Child::Token(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    #[inline]
    pub fn is_token(&self, text: &str) -> bool {
        self.as_token() == Some(text)
    }

    fn same_structure(&self, other: &Child) -> bool {
        match (self, other) {
            (Child::Node(a), Child::Node(b)) => a.same_structure(b),
            (Child::Token(a), Child::Token(b)) => a == b,
            _ => false,
        }
    }
}

/// A position-annotated syntax tree node.
///
/// `PartialEq` compares everything including positions; use
/// [`SyntaxNode::same_structure`] to compare shape and text only.
///
/// Nesting depth is bounded only by the source, so `Clone`, `PartialEq`
/// and `Display` grow the stack as they descend and `Drop` never recurses.
#[derive(Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<Child>,
    pub span: Span,
    pub position: Position,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, children: Vec<Child>, span: Span, position: Position) -> Self {
        SyntaxNode {
            kind,
            children,
            span,
            position,
        }
    }

    /// A leaf node holding one raw token.
    pub fn leaf(kind: NodeKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        SyntaxNode::new(kind, vec![Child::Token(text.into())], span, position)
    }

    /// Token text of a leaf node, `None` for anything with another shape.
    pub fn leaf_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [Child::Token(text)] if self.kind.is_leaf() => Some(text),
            _ => None,
        }
    }

    /// Identifier text if this node is an identifier leaf.
    pub fn ident_text(&self) -> Option<&str> {
        if self.kind == NodeKind::Identifier {
            self.leaf_text()
        } else {
            None
        }
    }

    /// Move the children out, leaving the node empty.
    pub fn take_children(&mut self) -> Vec<Child> {
        std::mem::take(&mut self.children)
    }

    /// Compare kind and children recursively, ignoring spans and positions.
    pub fn same_structure(&self, other: &SyntaxNode) -> bool {
        ensure_sufficient_stack(|| {
            self.kind == other.kind
                && self.children.len() == other.children.len()
                && self
                    .children
                    .iter()
                    .zip(&other.children)
                    .all(|(a, b)| a.same_structure(b))
        })
    }
}

impl Clone for SyntaxNode {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| SyntaxNode {
            kind: self.kind,
            children: self.children.clone(),
            span: self.span,
            position: self.position,
        })
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| {
            self.kind == other.kind
                && self.span == other.span
                && self.position == other.position
                && self.children == other.children
        })
    }
}

/// Drops the subtree with an explicit worklist so the native stack stays flat.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_nodes(&mut self.children, &mut pending);
        while let Some(mut node) = pending.pop() {
            // `node` drops at the end of the iteration with no node children left.
            detach_nodes(&mut node.children, &mut pending);
        }
    }
}

fn detach_nodes(children: &mut Vec<Child>, pending: &mut Vec<SyntaxNode>) {
    if children.iter().any(|child| matches!(child, Child::Node(_))) {
        pending.extend(
            std::mem::take(children)
                .into_iter()
                .filter_map(Child::into_node),
        );
    }
}

/// S-expression rendering: `(factor (atom (int-literal "2")) "^" ...)`.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "({}", self.kind)?;
            for child in &self.children {
                match child {
                    Child::Node(node) => write!(f, " {node}")?,
                    Child::Token(text) => write!(f, " {text:?}")?,
                }
            }
            f.write_str(")")
        })
    }
}
