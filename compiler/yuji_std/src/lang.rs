//! `std/core`: truthiness, type names and assertions.

use yuji_eval::errors::assertion_failed;
use yuji_eval::{Arity, EvalError, EvalResult, Module, NativeContext, Value};

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("core");
    module.define_native("not", Arity::Fixed(1), not)?;
    module.define_native("typeof", Arity::Fixed(1), type_of)?;
    module.define_native("assert", Arity::Variadic, assert)?;
    Ok(module)
}

fn not(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(!ctx.arg(args, 0)?.is_truthy()))
}

fn type_of(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::string(ctx.arg(args, 0)?.type_name()))
}

/// `assert(condition [, message])`. Without a message the failure reports
/// the condition's own display string.
fn assert(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let (condition, message) = match args {
        [condition] => (condition, condition),
        [condition, message] => (condition, message),
        _ => {
            return Err(ctx.error(format!("expects 1 or 2 arguments, got {}", args.len())));
        }
    };
    if condition.is_truthy() {
        Ok(Value::Null)
    } else {
        Err(assertion_failed(message.display_value()))
    }
}
