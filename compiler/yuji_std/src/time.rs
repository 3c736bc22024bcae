//! `std/time`: wall-clock seconds and sleeping.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use yuji_eval::{Arity, EvalError, EvalResult, Module, NativeContext, Value};

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("time");
    module.define_native("time", Arity::Fixed(0), time)?;
    module.define_native("sleep", Arity::Fixed(1), sleep)?;
    module.define_native("sleepms", Arity::Fixed(1), sleepms)?;
    Ok(module)
}

/// Seconds since the Unix epoch.
fn time(ctx: &mut NativeContext<'_>, _: &[Value]) -> EvalResult {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| ctx.error(err.to_string()))?;
    let secs = i64::try_from(elapsed.as_secs()).map_err(|err| ctx.error(err.to_string()))?;
    Ok(Value::int(secs))
}

/// Non-negative int argument as a duration count.
fn duration_arg(ctx: &NativeContext<'_>, args: &[Value]) -> Result<u64, EvalError> {
    let n = ctx.int_arg(args, 0)?;
    u64::try_from(n).map_err(|_| ctx.error(format!("duration must be non-negative, got {n}")))
}

fn sleep(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let secs = duration_arg(ctx, args)?;
    thread::sleep(Duration::from_secs(secs));
    Ok(Value::Null)
}

fn sleepms(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let millis = duration_arg(ctx, args)?;
    thread::sleep(Duration::from_millis(millis));
    Ok(Value::Null)
}
