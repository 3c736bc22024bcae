//! Evaluator behaviour tests, grouped by language feature.

mod call_tests;
mod module_tests;

use crate::{buffer_handler, EvalError, EvalResult, Interpreter};
use yuji_ir::{build::program, Expr};

/// Fresh interpreter whose output goes to a buffer.
pub(crate) fn interpreter() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .build()
        .unwrap()
}

/// Evaluate `items` as a program in a fresh interpreter.
pub(crate) fn run(items: Vec<Expr>) -> EvalResult {
    interpreter().eval_program(&program(items))
}

/// Evaluate `items`, expecting a runtime error.
pub(crate) fn run_err(items: Vec<Expr>) -> EvalError {
    match run(items) {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(err) => err,
    }
}
