//! Function declarations and calls.
//!
//! Every call pushes a fresh scope on top of the caller's current scope and
//! a call frame. Native arguments are evaluated in the caller's scope before
//! that push; user-function arguments are evaluated inside the new scope,
//! each one bound to its parameter before the next is evaluated. Errors
//! leaving a call pick up a backtrace at the innermost frame.
//!
//! A call consumes `Return`. `Break` and `Continue` pass through to the
//! caller, where an active loop consumes them.

use std::rc::Rc;

use yuji_ir::{Expr, Name, SharedFunction};

use super::Interpreter;
use crate::errors::{arity_mismatch, function_exists, not_callable, undefined_function, EvalResult};
use crate::flow::{Flow, FlowResult};
use crate::frames::CallFrame;
use crate::native::{NativeContext, NativeFunction};
use crate::value::Value;

impl Interpreter {
    /// A named declaration binds the function in the current scope and
    /// yields `null`; an anonymous one yields the function value.
    pub(super) fn eval_function_decl(&mut self, decl: &SharedFunction) -> FlowResult {
        let value = Value::function(Rc::clone(decl));
        let Some(name) = &decl.name else {
            return Ok(Flow::Normal(value));
        };
        if self.env.contains_local(name) {
            return Err(function_exists(name));
        }
        self.env.define(name.clone(), value);
        Ok(Flow::Normal(Value::Null))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee))]
    pub(super) fn eval_call(&mut self, callee: &Name, args: &[Expr]) -> FlowResult {
        let target = self
            .env
            .lookup(callee)
            .ok_or_else(|| undefined_function(callee))?;
        match target {
            Value::NativeFunction(native) => self.call_native(callee, &native, args),
            Value::Function(decl) => self.call_function(callee, &decl, args),
            other => Err(not_callable(callee, other.type_name())),
        }
    }

    fn call_native(&mut self, callee: &Name, native: &NativeFunction, args: &[Expr]) -> FlowResult {
        native.arity.check(callee, args.len())?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(value_of!(self.eval_expr(arg)));
        }

        let mut scoped = self.scoped();
        scoped
            .call_stack
            .push(CallFrame::new(callee.clone(), values))
            .map_err(|err| scoped.call_stack.attach_backtrace(err))?;
        let result = scoped
            .invoke_native(callee, native)
            .map_err(|err| scoped.call_stack.attach_backtrace(err));
        scoped.call_stack.pop();
        result.map(Flow::Normal)
    }

    /// Run a native callback against the arguments held by the top frame.
    fn invoke_native(&self, callee: &Name, native: &NativeFunction) -> EvalResult {
        let args = self
            .call_stack
            .top()
            .map_or(&[][..], |frame| frame.args.as_slice());
        let mut ctx = NativeContext::new(callee, self.env.current(), &self.print_handler);
        (native.func)(&mut ctx, args)
    }

    fn call_function(&mut self, callee: &Name, decl: &SharedFunction, args: &[Expr]) -> FlowResult {
        if decl.arity() != args.len() {
            return Err(arity_mismatch(callee, decl.arity(), args.len()));
        }

        let mut scoped = self.scoped();
        for (param, arg) in decl.params.iter().zip(args) {
            let value = value_of!(scoped.eval_expr(arg));
            scoped.env.define(param.clone(), value);
        }
        scoped
            .call_stack
            .push(CallFrame::new(callee.clone(), Vec::new()))
            .map_err(|err| scoped.call_stack.attach_backtrace(err))?;
        let result = match scoped.eval_block(&decl.body) {
            Ok(Flow::Return(value)) => Ok(Flow::Normal(value)),
            Ok(flow) => Ok(flow),
            Err(err) => Err(scoped.call_stack.attach_backtrace(err)),
        };
        scoped.call_stack.pop();
        result
    }
}
