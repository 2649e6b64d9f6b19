//! Mira Eval - tree-walking evaluator for Mira programs.
//!
//! Takes the nodes produced by `mira_parse::parse` and executes them.
//!
//! # Architecture
//!
//! - [`Evaluator`]: owns the persistent [`Environment`] and runs statements
//! - [`Interpreter`]: reduces expression nodes and tracks active calls
//! - [`evaluate_binary`]: direct enum dispatch over every operand pair
//! - [`Callable`]: a user-defined function with a shared, immutable body
//! - print handlers: where `echo` output goes
//!
//! # Example
//!
//! ```
//! use mira_eval::{buffer_handler, Evaluator, Value};
//!
//! let output = buffer_handler();
//! let mut evaluator = Evaluator::builder().print_handler(output.clone()).build();
//!
//! let program = mira_parse::parse("sq: int(n: int) = n * n\necho sq(n = 7)\n").unwrap();
//! let result = evaluator.execute(program).unwrap();
//!
//! assert_eq!(result, Some(Value::Int(49)));
//! assert_eq!(output.output(), "49\n");
//! ```

mod callable;
pub mod diagnostics;
mod environment;
pub mod errors;
mod evaluator;
mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use callable::{Callable, Param};
pub use environment::{AssignError, Environment};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use evaluator::{Evaluator, EvaluatorBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use interpreter::Interpreter;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use value::{Value, ValueKind};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
