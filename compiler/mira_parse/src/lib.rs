//! Recursive descent parser for Mira.
//!
//! Turns source text into the top-level statement nodes of a program.
//! Every node carries its span and line/column. Parsing is a pure function
//! of the source: the same text always produces the same tree.

mod cursor;
mod error;
mod grammar;
mod series;

use mira_diagnostic::LineOffsetTable;
use mira_ir::{Child, NodeKind, Span, SyntaxNode, TokenKind, TokenList};

use cursor::Cursor;
pub use error::{Expected, ParseError};
pub use series::{SeriesConfig, SeriesItem};

/// Parse a whole program.
///
/// Returns the top-level nodes in source order, including one `newline`
/// node per line break.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse(source: &str) -> Result<Vec<SyntaxNode>, ParseError> {
    let lines = LineOffsetTable::build(source);
    let tokens = mira_lexer::lex(source)
        .map_err(|err| ParseError::from_lex(&err).located(&lines, source))?;

    let mut parser = Parser::new(&tokens, source, &lines);
    let nodes = parser
        .parse_program()
        .map_err(|err| err.located(&lines, source))?;

    tracing::debug!(statements = nodes.len(), "parsed program");
    Ok(nodes)
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    lines: &'a LineOffsetTable,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str, lines: &'a LineOffsetTable) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
            source,
            lines,
        }
    }

    /// Build a node, resolving its position from the start of `span`.
    fn node(&self, kind: NodeKind, children: Vec<Child>, span: Span) -> SyntaxNode {
        let position = self.lines.span_position(self.source, span);
        SyntaxNode::new(kind, children, span, position)
    }

    /// Build a leaf node holding the source text of `span`.
    fn leaf(&self, kind: NodeKind, span: Span) -> SyntaxNode {
        let position = self.lines.span_position(self.source, span);
        SyntaxNode::leaf(kind, self.cursor.text(span), span, position)
    }

    /// Consume an identifier token as an `identifier` leaf.
    fn parse_ident(&mut self) -> Result<SyntaxNode, ParseError> {
        let Some(token) = self.cursor.eat(TokenKind::Ident) else {
            return Err(ParseError::unexpected(
                Expected::Node(NodeKind::Identifier),
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        };
        Ok(self.leaf(NodeKind::Identifier, token.span))
    }
}

/// Raw token child.
fn tok(text: &str) -> Child {
    Child::Token(text.to_string())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
