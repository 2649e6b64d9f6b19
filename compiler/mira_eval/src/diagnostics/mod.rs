//! Call tracking for the evaluator.
//!
//! `CallStack` records one `CallFrame` per active callable invocation and
//! enforces the call-depth bound. An error escaping a top-level call is
//! annotated with that call's site (see [`CallFrame::note`]).

use mira_ir::{Position, Span};

use crate::errors::{recursion_limit_exceeded, EvalError};

/// A single active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Name of the callable being invoked.
    pub name: String,
    /// Span of the call expression (the call site, not the definition).
    pub span: Span,
    pub position: Position,
}

impl CallFrame {
    pub fn new(name: impl Into<String>, span: Span, position: Position) -> Self {
        CallFrame {
            name: name.into(),
            span,
            position,
        }
    }

    /// Note for an error escaping this call.
    pub fn note(&self) -> String {
        format!("in call to `{}` at {}", self.name, self.position)
    }
}

/// Live call stack for the interpreter.
///
/// The depth check lives in `push()`: a frame past the limit is never
/// pushed.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unbounded calls.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// On overflow the error names the callable and is located at the call
    /// site.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                let mut err = recursion_limit_exceeded(&frame.name, max);
                err.span = Some(frame.span);
                err.position = Some(frame.position);
                return Err(err);
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) -> Option<CallFrame> {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

}

impl Default for CallStack {
    /// An unbounded call stack.
    fn default() -> Self {
        Self::new(None)
    }
}
