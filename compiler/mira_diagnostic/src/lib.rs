//! Diagnostic system for Mira error reporting.
//!
//! Every failure the compiler or evaluator reports can be turned into a
//! [`Diagnostic`]: a stable [`ErrorCode`], a message, labeled spans, and
//! notes. Front ends render diagnostics against the source text with
//! [`Diagnostic::render`].

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use span_utils::LineOffsetTable;
