//! Lexical variable scopes for one function activation.
//!
//! Each activation gets its own `Environment`; blocks push and pop scopes
//! on top of the function scope. Nothing is shared between activations, so
//! a callee never sees its caller's locals.

// Rc is the implementation of LocalScope<T>.
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use cairn_ir::Name;

use crate::value::Value;

/// Assignment to a name that no enclosing scope defines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndefinedBinding;

/// Single-threaded shared scope.
///
/// Wraps `Rc<RefCell<T>>` so that every scope allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
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

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define (or shadow) a variable in this scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Rebind the innermost visible definition of `name`.
    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), UndefinedBinding> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(UndefinedBinding)
    }
}

/// Scope stack for one activation.
#[derive(Debug)]
pub struct Environment {
    /// Innermost scope last. Never empty: index 0 is the function scope.
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::new())],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    fn current(&self) -> &LocalScope<Scope> {
        // The function scope is never popped.
        &self.scopes[self.scopes.len() - 1]
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost block scope. The function scope stays.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current().borrow_mut().define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), UndefinedBinding> {
        self.current().borrow_mut().assign(name, value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
