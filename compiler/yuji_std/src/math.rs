//! `std/math`: floating-point functions, `random`, and the constants `pi`
//! and `e`.
//!
//! Every unary function accepts an int or a float and returns a float.

use rand::Rng;

use yuji_eval::{Arity, EvalError, EvalResult, Module, NativeContext, NativeFn, Value};

/// Defines a native wrapping an `f64 -> f64` function.
macro_rules! unary_math {
    ($($name:ident => $op:expr),* $(,)?) => {
        $(
            fn $name(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
                let x = ctx.number_arg(args, 0)?;
                let op: fn(f64) -> f64 = $op;
                Ok(Value::float(op(x)))
            }
        )*
    };
}

unary_math! {
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    atan => f64::atan,
    sqrt => f64::sqrt,
    abs => f64::abs,
    floor => f64::floor,
    ceil => f64::ceil,
    round => f64::round,
}

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("math");
    module.define("pi", Value::float(std::f64::consts::PI))?;
    module.define("e", Value::float(std::f64::consts::E))?;

    let unary: [(&str, NativeFn); 9] = [
        ("sin", sin),
        ("cos", cos),
        ("tan", tan),
        ("atan", atan),
        ("sqrt", sqrt),
        ("abs", abs),
        ("floor", floor),
        ("ceil", ceil),
        ("round", round),
    ];
    for (name, func) in unary {
        module.define_native(name, Arity::Fixed(1), func)?;
    }
    module.define_native("pow", Arity::Fixed(2), pow)?;
    module.define_native("random", Arity::Fixed(2), random)?;
    Ok(module)
}

fn pow(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let base = ctx.number_arg(args, 0)?;
    let exponent = ctx.number_arg(args, 1)?;
    Ok(Value::float(base.powf(exponent)))
}

/// `random(min, max)`: a uniformly chosen int in `[min, max)`.
fn random(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let min = ctx.int_arg(args, 0)?;
    let max = ctx.int_arg(args, 1)?;
    if min >= max {
        return Err(ctx.error(format!("empty range [{min}, {max})")));
    }
    Ok(Value::int(rand::thread_rng().gen_range(min..max)))
}
