//! Lexer for Mira using logos.
//!
//! Produces a [`TokenList`] terminated by [`TokenKind::Eof`]. Numeric
//! literals are lexed unsigned; the parser folds an adjacent `+`/`-` into
//! the literal where a sign is allowed.

use logos::Logos;
use mira_ir::{Span, SpanError, Token, TokenKind, TokenList};
use std::fmt;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"#([^#\n][^\n]*)?")]
    LineComment,

    #[regex(r"##([^#]|#[^#])*##")]
    BlockComment,

    #[token("\n")]
    Newline,

    #[token("echo")]
    Echo,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token(",")]
    Comma,

    // A decimal point or an exponent makes it a number, so `123.` is a Num.
    #[regex(r"[0-9]+(\.[0-9]*|[eE][+-]?[0-9]+)")]
    Num,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Ident,
}

/// Lexing failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    /// A character no token starts with.
    UnexpectedChar { ch: char, span: Span },
    /// Source longer than spans can address.
    SourceTooLarge(SpanError),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::SourceTooLarge(_) => Span::DUMMY,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, .. } => write!(f, "unexpected character {ch:?}"),
            LexError::SourceTooLarge(err) => write!(f, "source too large: {err}"),
        }
    }
}

impl std::error::Error for LexError {}

/// Lex source code into a `TokenList`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::try_from_range(logos.span()).map_err(LexError::SourceTooLarge)?;
        match token_result {
            Ok(raw) => {
                if let Some(kind) = convert_token(raw) {
                    result.push(Token::new(kind, span));
                }
            }
            Err(()) => {
                let ch = logos.slice().chars().next().unwrap_or('\u{fffd}');
                return Err(LexError::UnexpectedChar { ch, span });
            }
        }
    }

    let eof = u32::try_from(source.len())
        .map_err(|_| LexError::SourceTooLarge(SpanError::EndTooLarge(source.len())))?;
    result.push(Token::new(TokenKind::Eof, Span::point(eof)));
    Ok(result)
}

/// Convert a raw token to a `TokenKind`; `None` for trivia.
fn convert_token(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return None,
        RawToken::Newline => TokenKind::Newline,
        RawToken::Echo => TokenKind::Echo,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Num => TokenKind::Num,
        RawToken::Int => TokenKind::Int,
        RawToken::Ident => TokenKind::Ident,
    };
    Some(kind)
}
