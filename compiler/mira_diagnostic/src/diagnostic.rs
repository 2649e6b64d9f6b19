//! Renderable error reports.

use std::fmt;
use std::fmt::Write as _;

use mira_ir::Span;

use crate::{ErrorCode, LineOffsetTable};

/// A span to point at, with an optional message.
///
/// Primary labels mark where the error is (`^^^`); secondary labels mark
/// related places (`---`), such as the `(` an unclosed group opened with.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    fn new(span: Span, message: impl Into<String>, is_primary: bool) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary,
        }
    }

    fn marker(&self) -> char {
        if self.is_primary {
            '^'
        } else {
            '-'
        }
    }
}

/// An error report: code, message, labeled spans and trailing notes.
#[derive(Clone, Eq, PartialEq, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message, true));
        self
    }

    /// Point at a related location.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message, false));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find_map(|label| label.is_primary.then_some(label.span))
    }

    /// Render in the familiar compiler layout:
    ///
    /// ```text
    /// error[E2001]: undefined variable `y`
    ///  --> line 2, col 7
    ///   |
    /// 2 | echo 1 + y
    ///   |          ^ not defined here
    ///  = note: ...
    /// ```
    pub fn render(&self, source: &str) -> String {
        let table = LineOffsetTable::build(source);
        let mut out = format!("{self}\n");

        for label in &self.labels {
            let pos = table.span_position(source, label.span);
            let line_text = table.line_text(source, pos.line).unwrap_or_default();
            let gutter = pos.line.to_string();
            let pad = " ".repeat(gutter.len());
            // Underline the label's text on its first line, at least one column.
            let width = source
                .get(label.span.to_range())
                .map_or(1, |text| text.chars().take_while(|&c| c != '\n').count())
                .max(1);
            let indent = " ".repeat((pos.column as usize).saturating_sub(1));
            let underline = label.marker().to_string().repeat(width);

            let _ = writeln!(out, "{pad}--> {pos}");
            let _ = writeln!(out, "{pad} |");
            let _ = writeln!(out, "{gutter} | {line_text}");
            let marked = format!("{pad} | {indent}{underline} {}", label.message);
            let _ = writeln!(out, "{}", marked.trim_end());
        }

        for note in &self.notes {
            let _ = writeln!(out, " = note: {note}");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}
