//! Token types produced by the lexer.
//!
//! Tokens carry no text of their own. The parser slices literal and
//! identifier text out of the source using the token's [`Span`].

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Mira.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Unsigned integer literal: `42`
    Int,
    /// Unsigned number literal: `1.5`, `2.`, `3e-4`
    Num,
    /// Identifier: `x`, `_tmp`, `int`
    Ident,
    /// `echo` keyword
    Echo,

    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Colon,
    Eq,
    Comma,

    /// `\n`, a statement terminator
    Newline,
    /// End of input
    Eof,
}

impl TokenKind {
    /// The fixed source text of punctuation and keyword tokens.
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            TokenKind::Echo => Some("echo"),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Caret => Some("^"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::Colon => Some(":"),
            TokenKind::Eq => Some("="),
            TokenKind::Comma => Some(","),
            TokenKind::Newline => Some("\n"),
            TokenKind::Int | TokenKind::Num | TokenKind::Ident | TokenKind::Eof => None,
        }
    }

    /// Human-readable name for error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Int => "integer literal",
            TokenKind::Num => "number literal",
            TokenKind::Ident => "identifier",
            TokenKind::Echo => "`echo`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Caret => "`^`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Eq => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        }
    }

    #[inline]
    pub const fn is_numeric_literal(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Num)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The lexed tokens of one source text, always terminated by [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_symbols() {
        assert_eq!(TokenKind::Caret.symbol(), Some("^"));
        assert_eq!(TokenKind::Echo.symbol(), Some("echo"));
        assert_eq!(TokenKind::Ident.symbol(), None);
        assert_eq!(TokenKind::Eof.symbol(), None);
    }

    #[test]
    fn numeric_literal_kinds() {
        assert!(TokenKind::Int.is_numeric_literal());
        assert!(TokenKind::Num.is_numeric_literal());
        assert!(!TokenKind::Ident.is_numeric_literal());
    }

    #[test]
    fn token_list_preserves_order() {
        let mut list = TokenList::new();
        list.push(Token::new(TokenKind::Int, Span::new(0, 1)));
        list.push(Token::new(TokenKind::Plus, Span::new(2, 3)));
        list.push(Token::new(TokenKind::Eof, Span::point(3)));

        assert_eq!(list.len(), 3);
        assert_eq!(
            list.kinds().collect::<Vec<_>>(),
            vec![TokenKind::Int, TokenKind::Plus, TokenKind::Eof]
        );
        assert_eq!(list.get(1).map(|t| t.span), Some(Span::new(2, 3)));
    }

    #[test]
    fn token_debug_shows_span() {
        let token = Token::new(TokenKind::Ident, Span::new(4, 7));
        assert_eq!(format!("{token:?}"), "Ident @ 4..7");
    }
}
