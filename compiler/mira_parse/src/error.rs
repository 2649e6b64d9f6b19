//! Parse error types.

use std::fmt;

use mira_diagnostic::{Diagnostic, ErrorCode, LineOffsetTable};
use mira_ir::{NodeKind, Position, Span, TokenKind};
use mira_lexer::LexError;

/// What the parser was looking for when it failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Expected {
    /// A grammar production such as `atom` or `identifier`.
    Node(NodeKind),
    /// A specific token.
    Token(TokenKind),
    /// A type name or `=` after `name :`.
    TypeOrEquals,
    /// `=` or a parameter list after `name : type`.
    EqualsOrParams,
    /// An argument name not already used in the same call.
    DistinctArgument,
    /// A newline or the end of input.
    EndOfStatement,
    /// Any token the lexer recognizes.
    ValidToken,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Node(kind) => write!(f, "{kind}"),
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::TypeOrEquals => f.write_str("type name or `=`"),
            Expected::EqualsOrParams => f.write_str("`=` or `(`"),
            Expected::DistinctArgument => f.write_str("distinct argument name"),
            Expected::EndOfStatement => f.write_str("end of statement"),
            Expected::ValidToken => f.write_str("valid token"),
        }
    }
}

/// Structural parse error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Line and column of `span.start`. Filled in by [`crate::parse`].
    pub position: Position,
    pub expected: Expected,
    /// Related location, e.g. the `(` an unclosed group started at.
    pub related: Option<Span>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span, expected: Expected) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            position: Position::START,
            expected,
            related: None,
            help: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span) -> Self {
        self.related = Some(span);
        self
    }

    /// Resolve `position` from `span` against the source.
    #[must_use]
    pub fn located(mut self, lines: &LineOffsetTable, source: &str) -> Self {
        self.position = lines.span_position(source, self.span);
        self
    }

    #[cold]
    pub fn from_lex(err: &LexError) -> Self {
        let code = match err {
            LexError::UnexpectedChar { .. } => ErrorCode::E0001,
            LexError::SourceTooLarge(_) => ErrorCode::E0002,
        };
        ParseError::new(code, err.to_string(), err.span(), Expected::ValidToken)
    }

    /// Found `found` where `expected` was required.
    #[cold]
    pub fn unexpected(expected: Expected, found: TokenKind, span: Span) -> Self {
        let code = match expected {
            Expected::Node(NodeKind::Atom | NodeKind::Expr) => ErrorCode::E1002,
            Expected::Node(NodeKind::Identifier) => ErrorCode::E1004,
            Expected::TypeOrEquals => ErrorCode::E1005,
            Expected::EndOfStatement => ErrorCode::E1007,
            _ => ErrorCode::E1001,
        };
        ParseError::new(code, format!("expected {expected}, found {found}"), span, expected)
    }

    /// A `(` with no matching `)`.
    #[cold]
    pub fn unclosed_paren(open: Span, found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("unmatched `(`, found {found}"),
            span,
            Expected::Token(TokenKind::RParen),
        )
        .with_related(open)
        .with_help("add a `)` to close the group")
    }

    /// `+`/`-` not written directly before a number.
    #[cold]
    pub fn detached_sign(sign: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1008,
            format!("expected atom, found {sign}"),
            span,
            Expected::Node(NodeKind::Atom),
        )
        .with_help("a sign must be written directly before a number, as in `-5`")
    }

    #[cold]
    pub fn duplicate_argument(name: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("argument `{name}` is given more than once"),
            span,
            Expected::DistinctArgument,
        )
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(self.message)
            .with_label(self.span, format!("expected {}", self.expected));
        if let Some(related) = self.related {
            diag = diag.with_secondary_label(related, "opened here");
        }
        for help in self.help {
            diag = diag.with_note(help);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}
