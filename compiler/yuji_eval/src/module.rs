//! Module registry for `use`.
//!
//! A module is a named scope of bindings plus named submodules. Modules are
//! registered once when the interpreter is built. `use "a/b"` resolves the
//! path segment by segment and merges the target's bindings into the
//! current scope; it does not create a namespace.

use rustc_hash::FxHashMap;
use tracing::debug;

use yuji_ir::Name;

use crate::environment::Scope;
use crate::errors::{
    duplicate_binding, duplicate_module, module_not_found, submodule_not_found, EvalError,
};
use crate::native::{Arity, NativeFn};
use crate::value::Value;

/// A named bundle of bindings.
#[derive(Clone, Debug)]
pub struct Module {
    name: Name,
    scope: Scope,
    submodules: FxHashMap<Name, Module>,
}

impl Module {
    pub fn new(name: impl Into<Name>) -> Self {
        Module {
            name: name.into(),
            scope: Scope::new(),
            submodules: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The module's own bindings (submodules are not included).
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Add a binding. Each name may be defined once per module.
    pub fn define(&mut self, name: impl Into<Name>, value: Value) -> Result<(), EvalError> {
        let name = name.into();
        if self.scope.contains_local(&name) {
            return Err(duplicate_binding(&self.name, &name));
        }
        self.scope.set(name, value);
        Ok(())
    }

    /// Add a native function binding.
    pub fn define_native(&mut self, name: &str, arity: Arity, func: NativeFn) -> Result<(), EvalError> {
        self.define(name, Value::native(name, arity, func))
    }

    /// Add a submodule. Submodule names are unique within a module.
    pub fn add_submodule(&mut self, module: Module) -> Result<(), EvalError> {
        if self.submodules.contains_key(&module.name) {
            return Err(duplicate_module(&module.name));
        }
        self.submodules.insert(module.name.clone(), module);
        Ok(())
    }

    pub fn submodule(&self, name: &str) -> Option<&Module> {
        self.submodules.get(name)
    }

    /// Names of direct submodules, sorted.
    pub fn submodule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.submodules.keys().map(Name::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up one of the module's own bindings.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope.lookup(name)
    }
}

/// Top-level modules known to an interpreter.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<Name, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level module; names must be unique.
    pub fn register(&mut self, module: Module) -> Result<(), EvalError> {
        if self.modules.contains_key(&module.name) {
            return Err(duplicate_module(&module.name));
        }
        debug!(module = %module.name, bindings = module.scope.len(), "registered module");
        self.modules.insert(module.name.clone(), module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Resolve a `/`-separated path: the first segment names a top-level
    /// module, each later segment a submodule of the previous one.
    pub fn resolve(&self, path: &str) -> Result<&Module, EvalError> {
        let mut segments = path.split('/');
        let first = segments.next().unwrap_or_default();
        let mut module = self.get(first).ok_or_else(|| module_not_found(first))?;
        for segment in segments {
            module = module
                .submodule(segment)
                .ok_or_else(|| submodule_not_found(&module.name, segment))?;
        }
        Ok(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
