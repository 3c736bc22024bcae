//! Blocks and control flow.
//!
//! A block stops at the first non-`Normal` flow and hands it to its
//! enclosing construct. Loops consume `Break` and `Continue`; calls consume
//! `Return` and pass the loop signals on to their caller. `break` and
//! `continue` are valid while any loop is active, `return` only inside a
//! call.

use yuji_ir::{Block, Expr, IfBranch};

use super::Interpreter;
use crate::errors::{break_outside_loop, continue_outside_loop, return_outside_function};
use crate::flow::{Flow, FlowResult};
use crate::value::Value;

impl Interpreter {
    /// Evaluate a block in a fresh scope. The result is the last
    /// expression's value, or `null` for an empty block.
    pub(crate) fn eval_block(&mut self, block: &Block) -> FlowResult {
        let mut scoped = self.scoped();
        let mut last = Value::Null;
        for expr in &block.exprs {
            match scoped.eval_expr(expr)? {
                Flow::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// First branch with a truthy condition wins; otherwise the `else` body,
    /// otherwise `null`.
    pub(super) fn eval_if(&mut self, branches: &[IfBranch], else_body: Option<&Block>) -> FlowResult {
        for branch in branches {
            let condition = value_of!(self.eval_expr(&branch.condition));
            if condition.is_truthy() {
                return self.eval_block(&branch.body);
            }
        }
        match else_body {
            Some(body) => self.eval_block(body),
            None => Ok(Flow::Normal(Value::Null)),
        }
    }

    /// `while`: evaluates to the last completed iteration's value.
    pub(super) fn eval_while(&mut self, condition: &Expr, body: &Block) -> FlowResult {
        self.with_env_scope(|scoped| {
            scoped.loop_stack.enter();
            let result = scoped.run_loop(condition, body);
            scoped.loop_stack.exit();
            result
        })
    }

    /// The condition is evaluated before every check, including the one
    /// that follows a `break`.
    fn run_loop(&mut self, condition: &Expr, body: &Block) -> FlowResult {
        let mut last = Value::Null;
        let mut broke = false;
        loop {
            let keep_going = value_of!(self.eval_expr(condition));
            if broke || !keep_going.is_truthy() {
                break;
            }
            match self.eval_block(body)? {
                Flow::Normal(value) => last = value,
                Flow::Continue => {}
                Flow::Break => broke = true,
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Normal(last))
    }

    pub(super) fn eval_return(&mut self, value: Option<&Expr>) -> FlowResult {
        if self.call_stack.is_empty() {
            return Err(return_outside_function());
        }
        let value = match value {
            Some(expr) => value_of!(self.eval_expr(expr)),
            None => Value::Null,
        };
        Ok(Flow::Return(value))
    }

    pub(super) fn eval_break(&mut self) -> FlowResult {
        if self.loop_stack.is_empty() {
            return Err(break_outside_loop());
        }
        Ok(Flow::Break)
    }

    pub(super) fn eval_continue(&mut self) -> FlowResult {
        if self.loop_stack.is_empty() {
            return Err(continue_outside_loop());
        }
        Ok(Flow::Continue)
    }
}
