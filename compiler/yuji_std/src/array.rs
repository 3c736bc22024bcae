//! `std/array`: length and in-place push/pop.
//!
//! Arrays are shared, so `push` and `pop` are visible through every
//! binding that holds the array.

use yuji_eval::errors::wrong_arg_type;
use yuji_eval::{Arity, ArrayBuf, EvalError, EvalResult, Heap, Module, NativeContext, Value};

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("array");
    module.define_native("len", Arity::Fixed(1), len)?;
    module.define_native("push", Arity::Fixed(2), push)?;
    module.define_native("pop", Arity::Fixed(1), pop)?;
    Ok(module)
}

/// First argument as an array.
fn array_arg<'v>(ctx: &NativeContext<'_>, args: &'v [Value]) -> Result<&'v Heap<ArrayBuf>, EvalError> {
    let arg = ctx.arg(args, 0)?;
    arg.as_array()
        .ok_or_else(|| wrong_arg_type(ctx.function_name(), 1, "array", arg))
}

fn len(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let items = array_arg(ctx, args)?;
    let len = items.borrow().len();
    i64::try_from(len)
        .map(Value::int)
        .map_err(|err| ctx.error(err.to_string()))
}

fn push(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let items = array_arg(ctx, args)?;
    let value = ctx.arg(args, 1)?.clone();
    items.borrow_mut().push(value);
    Ok(Value::Null)
}

/// Remove and return the last element.
fn pop(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let items = array_arg(ctx, args)?;
    let last = items.borrow_mut().pop();
    last.ok_or_else(|| ctx.error("called on empty array"))
}
