//! Program and statement parsing.
//!
//! ```text
//! prog          = (statement? newline)* statement?
//! statement     = echo | callable_def | var_def | var_set | expr
//! echo          = "echo" expr
//! callable_def  = ident ":" ident "(" paramlist ")" "=" expr
//! var_def       = ident ":" ident "=" expr | ident ":" "=" expr
//! var_set       = ident "=" expr
//! paramlist     = (ident ":" ident ",")* [ident ":" ident [","]]
//! ```

use mira_ir::{Child, NodeKind, Span, SyntaxNode, TokenKind};
use tracing::trace;

use crate::{tok, Expected, ParseError, Parser, SeriesConfig};

impl Parser<'_> {
    /// Parse statements and newlines until end of input.
    pub(crate) fn parse_program(&mut self) -> Result<Vec<SyntaxNode>, ParseError> {
        let mut nodes = Vec::new();

        while !self.cursor.is_at_end() {
            if let Some(newline) = self.cursor.eat(TokenKind::Newline) {
                nodes.push(self.leaf(NodeKind::Newline, newline.span));
                continue;
            }

            let stmt = self.parse_statement()?;
            trace!(kind = %stmt.kind, line = stmt.position.line, "statement");
            nodes.push(stmt);

            match self.cursor.current_kind() {
                TokenKind::Newline | TokenKind::Eof => {}
                found => {
                    return Err(ParseError::unexpected(
                        Expected::EndOfStatement,
                        found,
                        self.cursor.current_span(),
                    ));
                }
            }
        }

        Ok(nodes)
    }

    fn parse_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        match (self.cursor.current_kind(), self.cursor.peek_kind(1)) {
            (TokenKind::Echo, _) => self.parse_echo(),
            (TokenKind::Ident, TokenKind::Colon) => self.parse_definition(),
            (TokenKind::Ident, TokenKind::Eq) => self.parse_var_assign(),
            _ => self.parse_expr(),
        }
    }

    /// `"echo" expr`
    fn parse_echo(&mut self) -> Result<SyntaxNode, ParseError> {
        let keyword = self.cursor.expect(TokenKind::Echo)?;
        let value = self.parse_expr()?;
        let span = keyword.span.merge(value.span);
        Ok(self.node(NodeKind::Echo, vec![tok("echo"), Child::Node(value)], span))
    }

    /// `ident "=" expr`
    fn parse_var_assign(&mut self) -> Result<SyntaxNode, ParseError> {
        let name = self.parse_ident()?;
        self.cursor.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let span = name.span.merge(value.span);
        Ok(self.node(
            NodeKind::VarAssign,
            vec![Child::Node(name), tok("="), Child::Node(value)],
            span,
        ))
    }

    /// Everything starting with `ident ":"`.
    fn parse_definition(&mut self) -> Result<SyntaxNode, ParseError> {
        let name = self.parse_ident()?;
        self.cursor.expect(TokenKind::Colon)?;

        match (self.cursor.current_kind(), self.cursor.peek_kind(1)) {
            // x: = expr
            (TokenKind::Eq, _) => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = name.span.merge(value.span);
                Ok(self.node(
                    NodeKind::VarDefine,
                    vec![Child::Node(name), tok(":"), tok("="), Child::Node(value)],
                    span,
                ))
            }
            // f: int(a: int) = expr
            (TokenKind::Ident, TokenKind::LParen) => {
                let signature = self.parse_callable_type()?;
                self.cursor.expect(TokenKind::Eq)?;
                let body = self.parse_expr()?;
                let span = name.span.merge(body.span);
                Ok(self.node(
                    NodeKind::CallableDefine,
                    vec![
                        Child::Node(name),
                        tok(":"),
                        Child::Node(signature),
                        tok("="),
                        Child::Node(body),
                    ],
                    span,
                ))
            }
            // x: int = expr
            (TokenKind::Ident, TokenKind::Eq) => {
                let ty = self.parse_ident()?;
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = name.span.merge(value.span);
                Ok(self.node(
                    NodeKind::VarDefine,
                    vec![
                        Child::Node(name),
                        tok(":"),
                        Child::Node(ty),
                        tok("="),
                        Child::Node(value),
                    ],
                    span,
                ))
            }
            (TokenKind::Ident, found) => Err(ParseError::unexpected(
                Expected::EqualsOrParams,
                found,
                self.cursor.peek_span(1),
            )),
            (found, _) => Err(ParseError::unexpected(
                Expected::TypeOrEquals,
                found,
                self.cursor.current_span(),
            )),
        }
    }

    /// `ident "(" paramlist ")"`, the identifier being the return type.
    fn parse_callable_type(&mut self) -> Result<SyntaxNode, ParseError> {
        let return_ty = self.parse_ident()?;
        let open = self.cursor.expect(TokenKind::LParen)?;
        let params = self.parse_param_list()?;
        let Some(close) = self.cursor.eat(TokenKind::RParen) else {
            return Err(ParseError::unclosed_paren(
                open.span,
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        };

        let span = return_ty.span.merge(close.span);
        Ok(self.node(
            NodeKind::CallableType,
            vec![Child::Node(return_ty), tok("("), Child::Node(params), tok(")")],
            span,
        ))
    }

    /// Flat `ident ":" ident [","]` groups.
    fn parse_param_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.cursor.current_span();
        let items = self.series(SeriesConfig::comma(TokenKind::RParen), |p| {
            let name = p.parse_ident()?;
            p.cursor.expect(TokenKind::Colon)?;
            let ty = p.parse_ident()?;
            Ok((name, ty))
        })?;

        let mut span = Span::point(start.start);
        let mut children = Vec::with_capacity(items.len() * 4);
        for entry in items {
            let (name, ty) = entry.item;
            span = span.merge(name.span).merge(ty.span);
            children.push(Child::Node(name));
            children.push(tok(":"));
            children.push(Child::Node(ty));
            if let Some(sep) = entry.separator {
                span = span.merge(sep);
                children.push(tok(","));
            }
        }

        Ok(self.node(NodeKind::ParamList, children, span))
    }
}
