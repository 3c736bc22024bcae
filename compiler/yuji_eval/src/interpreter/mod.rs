//! Tree-walking interpreter.
//!
//! `Interpreter` owns the environment, the module registry, the call and
//! loop stacks, and the print handler. `eval` dispatches on the node kind;
//! the heavier node kinds live in sibling modules:
//!
//! - `control`: blocks, `if`, `while`, `return`, `break`, `continue`
//! - `call`: function declarations and calls (user and native)
//! - `index`: array literals, indexing, index assignment

mod builder;
mod call;
mod control;
mod index;
mod scope_guard;

use tracing::{debug, trace};

use yuji_ir::{Expr, Name, Program};

use crate::environment::Environment;
use crate::errors::{undefined_variable, variable_exists, EvalBacktrace, EvalError, EvalResult};
use crate::flow::{Flow, FlowResult};
use crate::frames::{CallStack, LoopStack, DEFAULT_MAX_STACK_SIZE};
use crate::module::{Module, ModuleRegistry};
use crate::operators::evaluate_binary;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

/// Tree-walking interpreter for Yuji programs.
///
/// Fields are dropped in declaration order: scopes first (innermost
/// outward), then modules, then the frame stacks.
pub struct Interpreter {
    /// Scope stack; the top is the current scope.
    env: Environment,
    /// Modules available to `use`.
    modules: ModuleRegistry,
    /// Active calls, bounded by the configured maximum depth.
    call_stack: CallStack,
    /// Active `while` loops.
    loop_stack: LoopStack,
    /// Destination for script output.
    print_handler: SharedPrintHandler,
}

impl Interpreter {
    /// An interpreter with no modules, printing to stdout.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_MAX_STACK_SIZE, stdout_handler())
    }

    /// Start configuring an interpreter.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    fn with_config(max_stack_size: usize, print_handler: SharedPrintHandler) -> Self {
        Interpreter {
            env: Environment::new(),
            modules: ModuleRegistry::new(),
            call_stack: CallStack::new(max_stack_size),
            loop_stack: LoopStack::new(),
            print_handler,
        }
    }

    /// Evaluate every top-level item in the root scope. The result is the
    /// last item's value, or `null` for an empty program.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        debug!(items = program.items.len(), "eval program");
        let mut last = Value::Null;
        for item in &program.items {
            last = self.eval(item)?;
        }
        Ok(last)
    }

    /// Evaluate a single top-level expression in the current scope.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        self.eval_expr(expr).map(Flow::into_value)
    }

    /// Evaluate an expression, reporting non-local exits as `Flow`.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> FlowResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> FlowResult {
        trace!(kind = expr.kind_name(), "eval");
        match expr {
            Expr::Int(n) => Ok(Flow::Normal(Value::Int(*n))),
            Expr::Float(f) => Ok(Flow::Normal(Value::Float(*f))),
            Expr::Str(s) => Ok(Flow::Normal(Value::string(s.as_str()))),
            Expr::Bool(b) => Ok(Flow::Normal(Value::Bool(*b))),
            Expr::Null => Ok(Flow::Normal(Value::Null)),
            Expr::Ident(name) => self
                .env
                .lookup(name)
                .map(Flow::Normal)
                .ok_or_else(|| undefined_variable(name)),
            Expr::Binary { op, left, right } => {
                let left = value_of!(self.eval_expr(left));
                let right = value_of!(self.eval_expr(right));
                evaluate_binary(left, right, *op).map(Flow::Normal)
            }
            Expr::Let { name, value } => self.eval_let(name, value),
            Expr::Assign { name, value } => self.eval_assign(name, value),
            Expr::Block(block) => self.eval_block(block),
            Expr::Function(decl) => self.eval_function_decl(decl),
            Expr::Call { callee, args } => self.eval_call(callee, args),
            Expr::Use(path) => self.eval_use(path),
            Expr::While { condition, body } => self.eval_while(condition, body),
            Expr::If {
                branches,
                else_body,
            } => self.eval_if(branches, else_body.as_ref()),
            Expr::Return(value) => self.eval_return(value.as_deref()),
            Expr::Break => self.eval_break(),
            Expr::Continue => self.eval_continue(),
            Expr::Array(elements) => self.eval_array(elements),
            Expr::Index { object, index } => self.eval_index(object, index),
            Expr::IndexAssign {
                object,
                index,
                value,
            } => self.eval_index_assign(object, index, value),
        }
    }

    /// `let name = value`: the name must not already be bound in the current
    /// scope; outer bindings may be shadowed.
    fn eval_let(&mut self, name: &Name, value: &Expr) -> FlowResult {
        if self.env.contains_local(name) {
            return Err(variable_exists(name));
        }
        let value = value_of!(self.eval_expr(value));
        self.env.define(name.clone(), value);
        Ok(Flow::Normal(Value::Null))
    }

    /// `name = value`: rebinds the nearest existing binding.
    fn eval_assign(&mut self, name: &Name, value: &Expr) -> FlowResult {
        if !self.env.contains(name) {
            return Err(undefined_variable(name));
        }
        let value = value_of!(self.eval_expr(value));
        self.env.assign(name, value)?;
        Ok(Flow::Normal(Value::Null))
    }

    /// `use "a/b"`: copy the module's bindings into the current scope.
    fn eval_use(&mut self, path: &str) -> FlowResult {
        let module = self.modules.resolve(path)?;
        debug!(path, bindings = module.scope().len(), "use module");
        self.env.merge(module.scope());
        Ok(Flow::Normal(Value::Null))
    }

    /// Define a binding in the root scope.
    pub fn define_global(&mut self, name: impl Into<Name>, value: Value) {
        self.env.define_global(name.into(), value);
    }

    /// Look a name up from the current scope outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.lookup(name)
    }

    /// Register a top-level module for `use`.
    pub fn register_module(&mut self, module: Module) -> Result<(), EvalError> {
        self.modules.register(module)
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Live call frames, outermost first.
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Active loops, outermost first.
    pub fn loop_stack(&self) -> &LoopStack {
        &self.loop_stack
    }

    /// Snapshot of the live call stack, most recent call first.
    pub fn backtrace(&self) -> EvalBacktrace {
        self.call_stack.capture()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured by a buffer print handler.
    pub fn get_print_output(&self) -> String {
        self.print_handler.get_output()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
