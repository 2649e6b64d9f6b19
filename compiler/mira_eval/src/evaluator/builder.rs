//! `EvaluatorBuilder` for configuring an [`Evaluator`].

use super::Evaluator;
use crate::interpreter::Interpreter;
use crate::{stdout_handler, Environment, SharedPrintHandler};

/// Call depth allowed unless configured otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Builder for [`Evaluator`].
///
/// Defaults: an empty environment, echo to stdout, and a call depth of
/// [`DEFAULT_MAX_CALL_DEPTH`].
pub struct EvaluatorBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        EvaluatorBuilder {
            env: None,
            print_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }

    /// Resume from an existing environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Bound the number of simultaneously active calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Remove the call-depth bound. Only the native stack limits recursion.
    #[must_use]
    pub fn unbounded_calls(mut self) -> Self {
        self.max_call_depth = None;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            env: self.env.unwrap_or_default(),
            interpreter: Interpreter::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
