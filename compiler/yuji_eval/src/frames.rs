//! Live call and loop frames.
//!
//! `CallStack` bounds recursion and supplies backtraces. `LoopStack`
//! counts active `while` loops so `break` and `continue` outside any loop
//! can be rejected.

use yuji_ir::Name;

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};
use crate::value::Value;

/// Default limit on nested calls.
pub const DEFAULT_MAX_STACK_SIZE: usize = 10_000;

/// A single frame in the live call stack.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Called function's name as written at the call site.
    pub name: Name,
    /// Evaluated arguments of a native call, owned for the duration of the
    /// call. User-defined calls bind their arguments in the callee scope
    /// instead and leave this empty.
    pub args: Vec<Value>,
}

impl CallFrame {
    pub fn new(name: Name, args: Vec<Value>) -> Self {
        CallFrame { name, args }
    }
}

/// Live call stack for the interpreter.
///
/// The depth check is part of `push()`: a frame that would exceed the
/// limit is rejected with a stack-overflow error and not pushed.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Pop the most recent call frame, releasing its arguments.
    pub fn pop(&mut self) -> Option<CallFrame> {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop()
    }

    /// The innermost frame.
    #[inline]
    pub fn top(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Frames from outermost to innermost.
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame.name.to_string(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one from a deeper
    /// call.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STACK_SIZE)
    }
}

/// Count of active `while` loops.
///
/// `break` and `continue` are valid whenever any loop is active, including
/// one entered by a caller further down the call stack; the signal unwinds
/// through the intervening calls to reach it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopStack {
    depth: usize,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    #[inline]
    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "LoopStack::exit() without a loop");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn frame(name: &str) -> CallFrame {
        CallFrame::new(Name::new(name), Vec::new())
    }

    #[test]
    fn test_push_pop_depth() {
        let mut stack = CallStack::default();
        stack.push(frame("a")).unwrap();
        stack.push(frame("b")).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().map(|f| f.name.as_str()), Some("b"));
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_beyond_limit_is_stack_overflow() {
        let mut stack = CallStack::new(2);
        stack.push(frame("a")).unwrap();
        stack.push(frame("a")).unwrap();
        let err = stack.push(frame("a")).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_capture_is_most_recent_first() {
        let mut stack = CallStack::default();
        stack.push(frame("main")).unwrap();
        stack.push(frame("helper")).unwrap();
        assert_eq!(stack.capture().names(), vec!["helper", "main"]);
    }

    #[test]
    fn test_attach_keeps_innermost_backtrace() {
        let mut stack = CallStack::default();
        stack.push(frame("outer")).unwrap();
        stack.push(frame("inner")).unwrap();
        let err = stack.attach_backtrace(crate::errors::division_by_zero());
        stack.pop();
        let err = stack.attach_backtrace(err);
        assert_eq!(
            err.backtrace.map(|t| t.len()),
            Some(2),
            "outer frame must not overwrite the inner snapshot"
        );
    }

    #[test]
    fn test_attach_on_empty_stack_is_noop() {
        let stack = CallStack::default();
        let err = stack.attach_backtrace(crate::errors::division_by_zero());
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn test_native_frame_owns_args() {
        let arg = Value::string("payload");
        let mut stack = CallStack::default();
        stack
            .push(CallFrame::new(Name::new("len"), vec![arg.clone()]))
            .unwrap();
        assert_eq!(arg.ref_count(), 2);
        stack.pop();
        assert_eq!(arg.ref_count(), 1);
    }

    #[test]
    fn test_loop_stack_enter_exit() {
        let mut loops = LoopStack::new();
        assert!(loops.is_empty());
        loops.enter();
        loops.enter();
        assert_eq!(loops.depth(), 2);
        loops.exit();
        loops.exit();
        assert!(loops.is_empty());
    }
}
