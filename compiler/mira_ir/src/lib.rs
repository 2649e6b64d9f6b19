//! Shared data types for the Mira compiler.
//!
//! Everything downstream of the lexer speaks in terms of these types:
//!
//! - [`Span`] and [`Position`]: where something came from
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`SyntaxNode`], [`NodeKind`], [`Child`]: parser output, evaluator input
//! - [`BinaryOp`]: the five arithmetic operators

mod node;
mod ops;
mod span;
mod token;

pub use node::{Child, NodeKind, SyntaxNode};
pub use ops::BinaryOp;
pub use span::{Position, Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
