//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! ```text
//! expr   = term   (("+" | "-") term)*
//! term   = factor (("*" | "/") factor)*
//! factor = atom ("^" factor)?
//! atom   = call | number | integer | ident | "(" expr ")"
//! ```
//!
//! `expr` and `term` are flat left-to-right chains; `factor` nests to the
//! right, which is what makes `^` right-associative.

use mira_ir::{Child, NodeKind, Span, SyntaxNode, TokenKind};
use mira_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{tok, Expected, ParseError, Parser, SeriesConfig};

fn is_additive(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Plus | TokenKind::Minus)
}

fn is_multiplicative(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Star | TokenKind::Slash)
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<SyntaxNode, ParseError> {
        ensure_sufficient_stack(|| self.parse_chain(NodeKind::Expr, is_additive, Self::parse_term))
    }

    fn parse_term(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_chain(NodeKind::Term, is_multiplicative, Self::parse_factor)
    }

    /// `operand (op operand)*` as one flat node of `kind`.
    fn parse_chain(
        &mut self,
        kind: NodeKind,
        is_op: fn(TokenKind) -> bool,
        parse_operand: fn(&mut Self) -> Result<SyntaxNode, ParseError>,
    ) -> Result<SyntaxNode, ParseError> {
        let first = parse_operand(self)?;
        let mut span = first.span;
        let mut children = vec![Child::Node(first)];

        while is_op(self.cursor.current_kind()) {
            let op = self.cursor.advance();
            let rhs = parse_operand(self)?;
            span = span.merge(rhs.span);
            children.push(tok(self.cursor.text(op.span)));
            children.push(Child::Node(rhs));
        }

        Ok(self.node(kind, children, span))
    }

    fn parse_factor(&mut self) -> Result<SyntaxNode, ParseError> {
        let atom = self.parse_atom()?;
        let mut span = atom.span;
        let mut children = vec![Child::Node(atom)];

        if self.cursor.eat(TokenKind::Caret).is_some() {
            let rhs = ensure_sufficient_stack(|| self.parse_factor())?;
            span = span.merge(rhs.span);
            children.push(tok("^"));
            children.push(Child::Node(rhs));
        }

        Ok(self.node(NodeKind::Factor, children, span))
    }

    fn parse_atom(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.cursor.current_span();
        let children = match self.cursor.current_kind() {
            TokenKind::LParen => {
                let open = self.cursor.advance();
                let inner = self.parse_expr()?;
                let Some(close) = self.cursor.eat(TokenKind::RParen) else {
                    return Err(ParseError::unclosed_paren(
                        open.span,
                        self.cursor.current_kind(),
                        self.cursor.current_span(),
                    ));
                };
                let span = open.span.merge(close.span);
                let children = vec![tok("("), Child::Node(inner), tok(")")];
                return Ok(self.node(NodeKind::Atom, children, span));
            }
            TokenKind::Ident if self.cursor.peek_kind(1) == TokenKind::LParen => {
                vec![Child::Node(self.parse_call()?)]
            }
            TokenKind::Ident => vec![Child::Node(self.parse_ident()?)],
            TokenKind::Int | TokenKind::Num => {
                vec![Child::Node(self.parse_literal()?)]
            }
            sign @ (TokenKind::Plus | TokenKind::Minus) => {
                if !(self.cursor.peek_kind(1).is_numeric_literal() && self.cursor.next_is_adjacent())
                {
                    return Err(ParseError::detached_sign(sign, start));
                }
                vec![Child::Node(self.parse_literal()?)]
            }
            found => {
                return Err(ParseError::unexpected(
                    Expected::Node(NodeKind::Atom),
                    found,
                    start,
                ));
            }
        };

        let span = children
            .first()
            .and_then(Child::as_node)
            .map_or(start, |node| node.span);
        Ok(self.node(NodeKind::Atom, children, span))
    }

    /// A numeric literal, folding in a directly preceding sign.
    fn parse_literal(&mut self) -> Result<SyntaxNode, ParseError> {
        let sign = match self.cursor.current_kind() {
            TokenKind::Plus | TokenKind::Minus => Some(self.cursor.advance()),
            _ => None,
        };

        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Int => NodeKind::IntLiteral,
            TokenKind::Num => NodeKind::NumLiteral,
            found => {
                return Err(ParseError::unexpected(
                    Expected::Node(NodeKind::Atom),
                    found,
                    token.span,
                ));
            }
        };
        self.cursor.advance();

        let span = sign.map_or(token.span, |sign| sign.span.merge(token.span));
        trace!(literal = self.cursor.text(span), "literal");
        Ok(self.leaf(kind, span))
    }

    /// `ident "(" arglist ")"`
    fn parse_call(&mut self) -> Result<SyntaxNode, ParseError> {
        let name = self.parse_ident()?;
        let open = self.cursor.expect(TokenKind::LParen)?;
        let args = self.parse_arg_list()?;
        let Some(close) = self.cursor.eat(TokenKind::RParen) else {
            return Err(ParseError::unclosed_paren(
                open.span,
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        };

        let span = name.span.merge(close.span);
        let children = vec![Child::Node(name), tok("("), Child::Node(args), tok(")")];
        Ok(self.node(NodeKind::Call, children, span))
    }

    /// `(ident "=" expr ",")* [ident "=" expr [","]]`, names distinct.
    fn parse_arg_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.cursor.current_span();
        let items = self.series(SeriesConfig::comma(TokenKind::RParen), |p| {
            let name = p.parse_ident()?;
            p.cursor.expect(TokenKind::Eq)?;
            let value = p.parse_expr()?;
            Ok((name, value))
        })?;

        let mut seen: Vec<&str> = Vec::with_capacity(items.len());
        for entry in &items {
            let (name, _) = &entry.item;
            let text = name.ident_text().unwrap_or_default();
            if seen.contains(&text) {
                return Err(ParseError::duplicate_argument(text, name.span));
            }
            seen.push(text);
        }

        let mut span = Span::point(start.start);
        let mut children = Vec::with_capacity(items.len() * 4);
        for entry in items {
            let (name, value) = entry.item;
            span = span.merge(name.span).merge(value.span);
            children.push(Child::Node(name));
            children.push(tok("="));
            children.push(Child::Node(value));
            if let Some(sep) = entry.separator {
                span = span.merge(sep);
                children.push(tok(","));
            }
        }

        Ok(self.node(NodeKind::ArgList, children, span))
    }
}
