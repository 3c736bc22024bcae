//! Environment for variable scoping in the interpreter.
//!
//! A stack of scopes, each linked to the one below it. The interpreter keeps
//! a single "current scope" (the top of the stack) and pushes/pops around
//! blocks, loops and calls. Lookups walk parent links outward.
//!
//! There are no closures: a called function's scope is pushed on top of the
//! caller's current scope, so free identifiers in its body resolve against
//! the call site's chain.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use yuji_ir::Name;

use crate::errors::{undefined_variable, EvalError};
use crate::value::Value;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// Child scopes hold a `LocalScope` to their parent; the environment's scope
/// stack holds one to each live scope.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope: name bindings plus an optional parent.
///
/// The scope owns its values; dropping the scope releases every binding.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty root scope.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new empty scope chained to `parent`.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define or overwrite `name` in this scope only. The previous occupant,
    /// if any, is released.
    #[inline]
    pub fn set(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// True if `name` is bound in this scope (parents are not consulted).
    #[inline]
    pub fn contains_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// True if `name` is bound here or in any ancestor.
    pub fn contains(&self, name: &str) -> bool {
        if self.bindings.contains_key(name) {
            return true;
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if scope.bindings.contains_key(name) {
                return true;
            }
            next = scope.parent.clone();
        }
        false
    }

    /// Look up a variable, innermost scope first.
    ///
    /// Call chains can be tens of thousands of scopes deep, so the walk is a
    /// loop over parent handles rather than recursion.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if let Some(value) = scope.bindings.get(name) {
                return Some(value.clone());
            }
            next = scope.parent.clone();
        }
        None
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &Name, value: Value) -> Result<(), EvalError> {
        if let Some(slot) = self.bindings.get_mut(name.as_str()) {
            *slot = value;
            return Ok(());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let mut scope = scope.borrow_mut();
            if let Some(slot) = scope.bindings.get_mut(name.as_str()) {
                *slot = value;
                return Ok(());
            }
            next = scope.parent.clone();
        }
        Err(undefined_variable(name))
    }

    /// Overwrite the nearest existing binding of `name`, or define it here if
    /// no scope in the chain has it.
    pub fn update(&mut self, name: Name, value: Value) {
        if self.contains(&name) {
            // The chain was just checked, so assign cannot miss.
            let _ = self.assign(&name, value);
        } else {
            self.set(name, value);
        }
    }

    /// Copy every binding of `source` into this scope. Values are shared,
    /// not deep-copied; rebinding a name here leaves `source` untouched.
    pub fn merge(&mut self, source: &Scope) {
        for (name, value) in &source.bindings {
            self.set(name.clone(), value.clone());
        }
    }

    /// Bindings of this scope only, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }
}

/// Environment for the interpreter using a scope stack.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Root scope (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Number of live scopes, including the root.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a new scope whose parent is the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current().clone();
        self.scopes
            .push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The root scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// The current (innermost) scope.
    #[inline]
    pub fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Define or overwrite `name` in the current scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current().borrow_mut().set(name, value);
    }

    #[inline]
    pub fn contains_local(&self, name: &str) -> bool {
        self.current().borrow().contains_local(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.current().borrow().contains(name)
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Rebind an existing variable; undefined names are an error.
    #[inline]
    pub fn assign(&mut self, name: &Name, value: Value) -> Result<(), EvalError> {
        self.current().borrow_mut().assign(name, value)
    }

    /// Rebind an existing variable, or define it in the current scope.
    #[inline]
    pub fn update(&mut self, name: Name, value: Value) {
        self.current().borrow_mut().update(name, value);
    }

    /// Merge `source`'s bindings into the current scope.
    pub fn merge(&mut self, source: &Scope) {
        self.current().borrow_mut().merge(source);
    }

    /// Define a binding in the root scope.
    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().set(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Environment {
    /// Release scopes innermost-first.
    fn drop(&mut self) {
        while self.scopes.pop().is_some() {}
    }
}
