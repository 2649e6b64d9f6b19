//! Token cursor for navigating the token stream.

use mira_ir::{Span, Token, TokenKind, TokenList};

use crate::{Expected, ParseError};

/// Position in a [`TokenList`] plus the source the tokens were lexed from.
///
/// The token list always ends with `Eof` and the cursor never moves past
/// it, so `current()` is always valid.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            source,
            pos: 0,
        }
    }

    const EOF: Token = Token {
        kind: TokenKind::Eof,
        span: Span::DUMMY,
    };

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Self::EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token `n` positions ahead (`peek_kind(0)` is current).
    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn peek_span(&self, n: usize) -> Span {
        self.tokens
            .get(self.pos + n)
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// True if the current token ends exactly where the next one starts.
    #[inline]
    pub fn next_is_adjacent(&self) -> bool {
        self.current_span().end == self.peek_span(1).start
    }

    /// Consume and return the current token. Stays put at `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of `kind` or fail.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        ParseError::unexpected(Expected::Token(kind), self.current_kind(), self.current_span())
    }

    /// Source text covered by `span`.
    #[inline]
    pub fn text(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or_default()
    }
}
