//! Yuji Std - the standard library, exposed as the `std` module.
//!
//! Each submodule is built from native functions over the evaluator's
//! native-call contract and imported with `use "std/<name>"`:
//!
//! - `std/core`: `not`, `typeof`, `assert`
//! - `std/io`: console printing, `format`, and file descriptors
//! - `std/math`: floating-point functions, `random`, `pi`, `e`
//! - `std/os`: `system`, `getenv`, `setenv`
//! - `std/time`: `time`, `sleep`, `sleepms`
//! - `std/array`: `len`, `push`, `pop`

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod array;
mod io;
mod lang;
mod math;
mod os;
mod time;

use tracing::debug;

use yuji_eval::{EvalError, InterpreterBuilder, Module};

/// Builds the `std` module with every submodule attached.
pub fn std_module() -> Result<Module, EvalError> {
    let loaders: [fn() -> Result<Module, EvalError>; 6] = [
        lang::module,
        io::module,
        math::module,
        os::module,
        time::module,
        array::module,
    ];
    let mut std = Module::new("std");
    for load in loaders {
        std.add_submodule(load()?)?;
    }
    debug!(submodules = ?std.submodule_names(), "loaded std");
    Ok(std)
}

/// Registers `std` on an interpreter builder.
///
/// ```
/// use yuji_eval::yuji_ir::build::*;
/// use yuji_eval::{buffer_handler, Interpreter};
///
/// let builder = Interpreter::builder().print_handler(buffer_handler());
/// let mut interp = yuji_std::install(builder)?.build()?;
/// interp.eval_program(&program(vec![
///     use_module("std/io"),
///     call("println", vec![string("hello")]),
/// ]))?;
/// assert_eq!(interp.get_print_output(), "hello\n");
/// # Ok::<(), yuji_eval::EvalError>(())
/// ```
pub fn install(builder: InterpreterBuilder) -> Result<InterpreterBuilder, EvalError> {
    Ok(builder.module(std_module()?))
}
