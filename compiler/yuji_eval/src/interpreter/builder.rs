//! `InterpreterBuilder` for creating configured interpreters.

use tracing::debug;

use yuji_ir::Name;

use super::Interpreter;
use crate::errors::EvalError;
use crate::frames::DEFAULT_MAX_STACK_SIZE;
use crate::module::Module;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::Value;

/// Builder for creating Interpreter instances with various configurations.
pub struct InterpreterBuilder {
    max_stack_size: usize,
    print_handler: Option<SharedPrintHandler>,
    modules: Vec<Module>,
    globals: Vec<(Name, Value)>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
            print_handler: None,
            modules: Vec::new(),
            globals: Vec::new(),
        }
    }

    /// Maximum number of nested calls before a stack-overflow error.
    #[must_use]
    pub fn max_stack_size(mut self, depth: usize) -> Self {
        self.max_stack_size = depth;
        self
    }

    /// Where script output goes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Register a top-level module for `use`.
    #[must_use]
    pub fn module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Pre-define a binding in the root scope.
    #[must_use]
    pub fn global(mut self, name: impl Into<Name>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    /// Build the interpreter. Fails if two modules share a name.
    pub fn build(self) -> Result<Interpreter, EvalError> {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let mut interpreter = Interpreter::with_config(self.max_stack_size, print_handler);
        for module in self.modules {
            interpreter.register_module(module)?;
        }
        for (name, value) in self.globals {
            interpreter.define_global(name, value);
        }
        debug!(
            max_stack_size = self.max_stack_size,
            modules = interpreter.modules().len(),
            "built interpreter"
        );
        Ok(interpreter)
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
