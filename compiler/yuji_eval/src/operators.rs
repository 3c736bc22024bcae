//! Binary operator implementations for the evaluator.
//!
//! Both operands are already evaluated when these run; `&&` and `||` do not
//! short-circuit. Integer pairs use checked integer arithmetic. If either
//! side is a float the operation is done in double precision.

use yuji_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, invalid_operands, modulo_by_zero, EvalResult,
};
use crate::value::Value;

/// Checked arithmetic operation with overflow handling.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation on two evaluated operands.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are consumed from evaluation; references would force clones at call sites"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => {
                eval_float_binary(a, b, op, (left.type_name(), right.type_name()))
            }
            _ => eval_other_binary(&left, &right, op),
        },
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And => Ok(Value::Bool(a != 0 && b != 0)),
        BinaryOp::Or => Ok(Value::Bool(a != 0 || b != 0)),
    }
}

#[expect(
    clippy::float_cmp,
    reason = "== and != compare doubles exactly, like the language's own semantics"
)]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp, types: (&'static str, &'static str)) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::Mod => Err(invalid_operands(op, types.0, types.1)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And => Ok(Value::Bool(a != 0.0 && b != 0.0)),
        BinaryOp::Or => Ok(Value::Bool(a != 0.0 || b != 0.0)),
    }
}

/// Non-numeric operands: equality is structural, logic uses truthiness.
fn eval_other_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        _ => Err(invalid_operands(op, left.type_name(), right.type_name())),
    }
}

