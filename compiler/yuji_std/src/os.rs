//! `std/os`: shell commands and environment variables.

use std::env;
use std::process::Command;

use tracing::debug;

use yuji_eval::{Arity, EvalError, EvalResult, Module, NativeContext, Value};

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("os");
    module.define_native("system", Arity::Fixed(1), system)?;
    module.define_native("getenv", Arity::Fixed(1), getenv)?;
    module.define_native("setenv", Arity::Fixed(2), setenv)?;
    Ok(module)
}

/// Run `cmd` through the platform shell and return its exit status.
/// A process killed by a signal reports -1.
fn system(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let cmd = ctx.str_arg(args, 0)?;
    debug!(cmd, "system");
    let status = shell(cmd)
        .status()
        .map_err(|err| ctx.error(format!("failed to run command: {err}")))?;
    Ok(Value::int(i64::from(status.code().unwrap_or(-1))))
}

#[cfg(windows)]
fn shell(cmd: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", cmd]);
    command
}

#[cfg(not(windows))]
fn shell(cmd: &str) -> Command {
    let mut command = Command::new("sh");
    command.args(["-c", cmd]);
    command
}

/// The variable's value, or `null` when it is unset or not valid UTF-8.
fn getenv(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let key = ctx.str_arg(args, 0)?;
    Ok(env::var(key).map_or(Value::Null, Value::string))
}

fn setenv(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let key = ctx.str_arg(args, 0)?;
    let value = ctx.str_arg(args, 1)?;
    if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
        return Err(ctx.error(format!("invalid environment variable '{key}'")));
    }
    env::set_var(key, value);
    Ok(Value::int(0))
}
