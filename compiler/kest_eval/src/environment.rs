//! Lexical scopes.
//!
//! An [`Environment`] is a cheap, cloneable handle to one scope: a map of
//! bindings plus an optional parent. Each scope sits behind its own
//! `RwLock`, so a lookup takes shared locks one scope at a time as it walks
//! toward the root, and a mutation locks only the scope it writes.
//!
//! Closures hold a handle to the scope they were defined in. A named
//! function literal binds itself in that same scope, which forms a
//! reference cycle; [`Environment::destroy`] breaks it by dropping the
//! scope's bindings and parent link.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::{undefined_symbol, undefined_type, unknown_symbol, EvalError};
use crate::{FunctionValue, Value, ValueKind};

/// Handle to a scope.
#[derive(Clone, Default)]
pub struct Environment {
    scope: Arc<RwLock<Scope>>,
}

#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

impl Environment {
    /// Create a root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment {
            scope: Arc::new(RwLock::new(Scope {
                bindings: FxHashMap::default(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.write().bindings.insert(name.into(), value);
    }

    /// Look `name` up, innermost scope first.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.find(name, Value::clone)
            .ok_or_else(|| undefined_symbol(name))
    }

    /// Overwrite `name` in the nearest scope that binds it.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        match self.try_set(name, value) {
            Ok(()) => Ok(()),
            Err(_) => Err(unknown_symbol(name)),
        }
    }

    /// Overwrite `name` where it is bound, or bind it in this scope if no
    /// enclosing scope has it.
    pub fn assign(&self, name: &str, value: Value) {
        if let Err(value) = self.try_set(name, value) {
            self.define(name, value);
        }
    }

    /// Kind of the value bound to `name`.
    pub fn kind_of(&self, name: &str) -> Result<ValueKind, EvalError> {
        self.find(name, Value::kind)
            .ok_or_else(|| undefined_type(name))
    }

    /// Whether `name` is bound in this scope or any enclosing one.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name, |_| ()).is_some()
    }

    /// Snapshot of this scope's own bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let mut bindings: Vec<_> = self
            .scope
            .read()
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.read().parent.clone()
    }

    /// Drop every binding and detach from the parent.
    ///
    /// Handles that still refer to this scope see it empty and rootless.
    pub fn destroy(&self) {
        let (bindings, parent) = {
            let mut scope = self.scope.write();
            (
                std::mem::take(&mut scope.bindings),
                scope.parent.take(),
            )
        };
        trace!(bindings = bindings.len(), "scope destroyed");
        // Values are dropped outside the lock: a closure's captured scope
        // may be this one.
        drop(bindings);
        drop(parent);
    }

    /// Whether anything outside this scope's own bindings still refers to
    /// it, such as a closure that was returned or stored elsewhere.
    ///
    /// The count is conservative: a closure bound under two names counts as
    /// escaped.
    pub(crate) fn is_captured(&self) -> bool {
        let self_bound = self
            .scope
            .read()
            .bindings
            .values()
            .filter(|value| match value {
                Value::Function(FunctionValue::Closure(closure)) => {
                    Arc::strong_count(closure) == 1 && closure.env.ptr_eq(self)
                }
                _ => false,
            })
            .count();
        Arc::strong_count(&self.scope) > 1 + self_bound
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.scope, &other.scope)
    }

    /// Walk toward the root, applying `f` to the first binding of `name`.
    fn find<T>(&self, name: &str, f: impl Fn(&Value) -> T) -> Option<T> {
        let mut env = self.clone();
        loop {
            let parent = {
                let scope = env.scope.read();
                if let Some(value) = scope.bindings.get(name) {
                    return Some(f(value));
                }
                scope.parent.clone()
            };
            env = parent?;
        }
    }

    /// Overwrite `name` in the nearest scope binding it, handing the value
    /// back when no scope does.
    fn try_set(&self, name: &str, value: Value) -> Result<(), Value> {
        let mut env = self.clone();
        loop {
            let parent = {
                let mut scope = env.scope.write();
                if let Some(slot) = scope.bindings.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => env = parent,
                None => return Err(value),
            }
        }
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.scope.read();
        let mut names: Vec<_> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
