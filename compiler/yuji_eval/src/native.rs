//! Host functions callable from scripts.
//!
//! A native function receives the evaluated arguments as a borrowed slice;
//! the call frame owns them and releases them when the call returns. The
//! function validates its own argument types and returns a fresh value or
//! an error.

use std::fmt;

use yuji_ir::Name;

use crate::environment::{LocalScope, Scope};
use crate::errors::{arity_mismatch, native_error, wrong_arg_type, EvalError};
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;
use crate::EvalResult;

/// Host callback signature.
pub type NativeFn = fn(&mut NativeContext<'_>, &[Value]) -> EvalResult;

/// Number of arguments a native function accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many; checked by the evaluator before the call.
    Fixed(usize),
    /// Any number; the function checks for itself.
    Variadic,
}

impl Arity {
    /// Reject a call to `name` with `count` arguments if the arity is fixed
    /// and does not match.
    #[inline]
    pub fn check(self, name: &str, count: usize) -> Result<(), EvalError> {
        match self {
            Arity::Fixed(expected) if expected != count => {
                Err(arity_mismatch(name, expected, count))
            }
            Arity::Fixed(_) | Arity::Variadic => Ok(()),
        }
    }
}

/// A native function value.
pub struct NativeFunction {
    pub name: Name,
    pub arity: Arity,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// What a native function can see of the interpreter while it runs.
pub struct NativeContext<'a> {
    name: &'a Name,
    scope: &'a LocalScope<Scope>,
    print: &'a SharedPrintHandler,
}

impl<'a> NativeContext<'a> {
    pub fn new(name: &'a Name, scope: &'a LocalScope<Scope>, print: &'a SharedPrintHandler) -> Self {
        NativeContext { name, scope, print }
    }

    /// Name the function was called by.
    pub fn function_name(&self) -> &str {
        self.name
    }

    /// The scope pushed for this call; its parent is the caller's scope.
    pub fn scope(&self) -> &LocalScope<Scope> {
        self.scope
    }

    /// Output sink for `print`-style functions.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.print
    }

    /// Domain error attributed to this function.
    #[cold]
    pub fn error(&self, message: impl Into<String>) -> EvalError {
        native_error(self.name, message)
    }

    /// Argument `index` (0-based) as an integer.
    pub fn int_arg(&self, args: &[Value], index: usize) -> Result<i64, EvalError> {
        let arg = self.arg(args, index)?;
        arg.as_int()
            .ok_or_else(|| wrong_arg_type(self.name, index + 1, "int", arg))
    }

    /// Argument `index` (0-based) as a number, widening ints.
    pub fn number_arg(&self, args: &[Value], index: usize) -> Result<f64, EvalError> {
        let arg = self.arg(args, index)?;
        arg.as_number()
            .ok_or_else(|| wrong_arg_type(self.name, index + 1, "int or float", arg))
    }

    /// Argument `index` (0-based) as a string slice.
    pub fn str_arg<'v>(&self, args: &'v [Value], index: usize) -> Result<&'v str, EvalError> {
        let arg = self.arg(args, index)?;
        arg.as_str()
            .ok_or_else(|| wrong_arg_type(self.name, index + 1, "string", arg))
    }

    /// Argument `index` (0-based), present or an error.
    pub fn arg<'v>(&self, args: &'v [Value], index: usize) -> Result<&'v Value, EvalError> {
        args.get(index)
            .ok_or_else(|| self.error(format!("missing argument {}", index + 1)))
    }
}
