//! Evaluation errors.
//!
//! [`EvalErrorKind`] says what went wrong; [`EvalError`] adds where. Errors
//! are built through the `#[cold]` factory functions below and located with
//! [`EvalError::at`] as they pass the node that caused them.

use std::fmt;

use mira_diagnostic::{Diagnostic, ErrorCode};
use mira_ir::{BinaryOp, NodeKind, Position, Span, SyntaxNode};

use crate::{Value, ValueKind};

/// Result of evaluating one node.
pub type EvalResult = Result<Value, EvalError>;

/// What went wrong during evaluation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("undefined function `{name}`")]
    UndefinedFunction { name: String },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("cannot construct a value of type `{target}` from {value}")]
    IncompatibleValue { target: ValueKind, value: Value },

    #[error("{}", argument_mismatch_message(.callable, .missing, .extra))]
    ArgumentMismatch {
        callable: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("parameter `{name}` of `{callable}` is declared more than once")]
    DuplicateParameter { callable: String, name: String },

    #[error("malformed {construct}: expected {expected}")]
    Malformed {
        construct: NodeKind,
        expected: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {}", .op.name())]
    IntegerOverflow { op: BinaryOp },

    #[error("maximum call depth exceeded calling `{name}` (limit: {limit})")]
    RecursionLimit { name: String, limit: usize },

    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral { kind: ValueKind, text: String },
}

fn argument_mismatch_message(callable: &str, missing: &[String], extra: &[String]) -> String {
    let list = |names: &[String]| {
        names
            .iter()
            .map(|n| format!("`{n}`"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut message = format!("arguments do not match the parameters of `{callable}`");
    if !missing.is_empty() {
        message.push_str(&format!(": missing {}", list(missing)));
    }
    if !extra.is_empty() {
        let sep = if missing.is_empty() { ":" } else { ";" };
        message.push_str(&format!("{sep} unexpected {}", list(extra)));
    }
    message
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E2001,
            EvalErrorKind::UndefinedFunction { .. } => ErrorCode::E2002,
            EvalErrorKind::UnknownType { .. } => ErrorCode::E2003,
            EvalErrorKind::IncompatibleValue { .. } => ErrorCode::E2004,
            EvalErrorKind::ArgumentMismatch { .. } => ErrorCode::E2005,
            EvalErrorKind::DuplicateParameter { .. } => ErrorCode::E2006,
            EvalErrorKind::Malformed { .. } => ErrorCode::E2007,
            EvalErrorKind::DivisionByZero => ErrorCode::E2008,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E2009,
            EvalErrorKind::RecursionLimit { .. } => ErrorCode::E2010,
            EvalErrorKind::InvalidLiteral { .. } => ErrorCode::E2011,
        }
    }
}

/// A semantic error with its source location, when known.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    pub position: Option<Position>,
    pub notes: Vec<String>,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            position: None,
            notes: Vec::new(),
        }
    }

    /// Locate the error at `node` unless an inner node already claimed it.
    #[must_use]
    pub fn at(mut self, node: &SyntaxNode) -> Self {
        if self.position.is_none() {
            self.span = Some(node.span);
            self.position = Some(node.position);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        if let Some(span) = self.span {
            diag = diag.with_label(span, "");
        }
        for note in self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at {position}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_type(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnknownType {
        name: name.to_string(),
    })
    .with_note("known types are `int` and `num`")
}

#[cold]
pub fn incompatible_value(target: ValueKind, value: Value) -> EvalError {
    EvalError::new(EvalErrorKind::IncompatibleValue { target, value })
}

#[cold]
pub fn argument_mismatch(callable: &str, missing: Vec<String>, extra: Vec<String>) -> EvalError {
    EvalError::new(EvalErrorKind::ArgumentMismatch {
        callable: callable.to_string(),
        missing,
        extra,
    })
}

#[cold]
pub fn duplicate_parameter(callable: &str, name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::DuplicateParameter {
        callable: callable.to_string(),
        name: name.to_string(),
    })
}

#[cold]
pub fn malformed(construct: NodeKind, expected: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Malformed {
        construct,
        expected: expected.into(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(op: BinaryOp) -> EvalError {
    EvalError::new(EvalErrorKind::IntegerOverflow { op })
}

#[cold]
pub fn recursion_limit_exceeded(name: &str, limit: usize) -> EvalError {
    EvalError::new(EvalErrorKind::RecursionLimit {
        name: name.to_string(),
        limit,
    })
}

#[cold]
pub fn invalid_literal(kind: ValueKind, text: &str) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidLiteral {
        kind,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn argument_mismatch_lists_names() {
        let missing_only = argument_mismatch("f", vec!["a".into()], vec![]);
        assert_eq!(
            missing_only.to_string(),
            "arguments do not match the parameters of `f`: missing `a`"
        );

        let both = argument_mismatch("f", vec!["a".into(), "b".into()], vec!["c".into()]);
        assert_eq!(
            both.to_string(),
            "arguments do not match the parameters of `f`: missing `a`, `b`; unexpected `c`"
        );

        let extra_only = argument_mismatch("g", vec![], vec!["z".into()]);
        assert_eq!(
            extra_only.to_string(),
            "arguments do not match the parameters of `g`: unexpected `z`"
        );
    }

    #[test]
    fn innermost_location_wins() {
        let inner = SyntaxNode::leaf(
            NodeKind::Identifier,
            "x",
            Span::new(4, 5),
            Position::new(1, 5),
        );
        let outer = SyntaxNode::new(NodeKind::Atom, vec![], Span::new(0, 9), Position::START);

        let err = undefined_variable("x").at(&inner).at(&outer);
        assert_eq!(err.position, Some(Position::new(1, 5)));
        assert_eq!(err.span, Some(Span::new(4, 5)));
        assert_eq!(err.to_string(), "undefined variable `x` at line 1, col 5");
    }

    #[test]
    fn codes_and_diagnostics() {
        let err = recursion_limit_exceeded("f", 8);
        assert_eq!(err.code(), ErrorCode::E2010);
        assert_eq!(
            err.to_string(),
            "maximum call depth exceeded calling `f` (limit: 8)"
        );

        let diag = unknown_type("float").into_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2003);
        assert_eq!(diag.message, "unknown type `float`");
        assert_eq!(diag.notes, vec!["known types are `int` and `num`".to_string()]);
        assert!(diag.labels.is_empty());
    }

    #[test]
    fn overflow_names_the_operation() {
        assert_eq!(
            integer_overflow(BinaryOp::Exp).to_string(),
            "integer overflow in exponentiation"
        );
    }
}
