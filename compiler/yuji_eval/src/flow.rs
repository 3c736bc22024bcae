//! Non-local exits as values.
//!
//! `return`, `break` and `continue` interrupt the enclosing structured
//! construct. Each evaluation step yields a `Flow`; blocks stop at the first
//! non-`Normal` flow and hand it outward until a loop (for `Break` and
//! `Continue`) or a function call (for `Return`) consumes it.

use crate::errors::EvalError;
use crate::value::Value;

/// Outcome of evaluating one expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Evaluation finished with a value.
    Normal(Value),
    /// A `return` is unwinding toward the nearest call.
    Return(Value),
    /// A `break` is unwinding toward the nearest loop.
    Break,
    /// A `continue` is unwinding toward the nearest loop.
    Continue,
}

/// Result of evaluating an expression, with control signals.
pub type FlowResult = Result<Flow, EvalError>;

impl Flow {
    /// The carried value; `null` for `Break`/`Continue`.
    pub fn into_value(self) -> Value {
        match self {
            Flow::Normal(v) | Flow::Return(v) => v,
            Flow::Break | Flow::Continue => Value::Null,
        }
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Flow::Normal(_))
    }
}

impl From<Value> for Flow {
    #[inline]
    fn from(value: Value) -> Self {
        Flow::Normal(value)
    }
}

/// Evaluate to the plain value, or return the control signal (or error) from
/// the enclosing function.
macro_rules! value_of {
    ($flow:expr) => {
        match $flow? {
            $crate::flow::Flow::Normal(value) => value,
            signal => return Ok(signal),
        }
    };
}
