
use crate::{buffer_handler, silent_handler, EvalError, Evaluator, SharedPrintHandler, Value};

/// Parse and execute `source` in a fresh evaluator.
fn run(source: &str) -> Result<Option<Value>, EvalError> {
    let nodes = mira_parse::parse(source).unwrap();
    Evaluator::builder()
        .print_handler(silent_handler())
        .build()
        .execute(nodes)
}

/// The value of a program that must succeed and produce one.
fn eval(source: &str) -> Value {
    run(source).unwrap().unwrap()
}

fn eval_err(source: &str) -> EvalError {
    run(source).unwrap_err()
}

/// An evaluator fed one source chunk at a time, with captured echo output.
struct Session {
    evaluator: Evaluator,
    output: SharedPrintHandler,
}

impl Session {
    fn new() -> Self {
        Self::with(Evaluator::builder())
    }

    fn with(builder: crate::EvaluatorBuilder) -> Self {
        let output = buffer_handler();
        let evaluator = builder.print_handler(output.clone()).build();
        Session { evaluator, output }
    }

    fn run(&mut self, source: &str) -> Result<Option<Value>, EvalError> {
        let nodes = mira_parse::parse(source).unwrap();
        self.evaluator.execute(nodes)
    }

    fn eval(&mut self, source: &str) -> Value {
        self.run(source).unwrap().unwrap()
    }

    fn var(&self, name: &str) -> Option<Value> {
        self.evaluator.env().variable(name)
    }
}
