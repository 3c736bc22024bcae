//! Yuji Eval - tree-walking evaluator for the Yuji scripting language.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Value`: reference-counted runtime values (`Heap<T>` over `Rc`)
//! - `Environment`: a stack of chained `Scope`s; lookups walk parent links
//! - `CallStack` / `LoopStack`: live frames used for depth limits, backtraces,
//!   and validating `return`/`break`/`continue`
//! - `Flow`: non-local exits travel as values, never as errors
//! - `ModuleRegistry`: named bundles of bindings merged into scope by `use`
//! - `NativeFunction`: host callbacks with a fixed or variadic arity
//!
//! Every runtime fault is an `EvalError` that unwinds to the embedding driver
//! with a snapshot of the call stack attached.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

#[macro_use]
mod flow;

mod environment;
pub mod errors;
mod frames;
pub mod interpreter;
mod logging;
mod module;
mod native;
mod operators;
mod print_handler;
mod stack;
mod value;

pub use environment::{Environment, LocalScope, Scope};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use flow::{Flow, FlowResult};
pub use frames::{CallFrame, CallStack, LoopStack, DEFAULT_MAX_STACK_SIZE};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use logging::init_tracing;
pub use module::{Module, ModuleRegistry};
pub use native::{Arity, NativeContext, NativeFn, NativeFunction};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{ArrayBuf, Heap, Value};

// Re-export the AST so embedders need only one dependency.
pub use yuji_ir;

#[cfg(test)]
mod tests;
