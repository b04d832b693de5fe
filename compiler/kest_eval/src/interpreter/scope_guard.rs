//! RAII scope management for the interpreter.
//!
//! Entering a scope swaps a fresh child environment in as the current one;
//! dropping the [`ScopedInterpreter`] guard swaps the previous environment
//! back and releases the child. Release runs on every exit path: normal
//! completion, `?` propagation, and unwinding.
//!
//! Releasing destroys the scope unless something outside its own bindings
//! still refers to it (a closure that was returned or assigned elsewhere).
//! A captured scope is left intact so the closure keeps seeing its
//! variables.
//!
//! ```text
//! self.with_env_scope(|scoped| scoped.exec_block(body))
//! ```

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::Interpreter;
use crate::{Environment, Value};

/// Guard that restores the enclosing scope on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: Option<Environment>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        let scope = std::mem::replace(&mut self.interpreter.env, saved);
        if scope.is_captured() {
            trace!("scope captured, keeping bindings");
        } else {
            scope.destroy();
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a child of the current scope.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        let parent = self.env.clone();
        self.scoped_in(&parent)
    }

    /// Enter a child of `parent`, which need not be the current scope.
    ///
    /// Function calls use this to run the body under the scope the
    /// function was defined in.
    pub fn scoped_in(&mut self, parent: &Environment) -> ScopedInterpreter<'_> {
        let saved = std::mem::replace(&mut self.env, parent.child());
        ScopedInterpreter {
            interpreter: self,
            saved: Some(saved),
        }
    }

    /// Run `f` in a child of the current scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` in a child of `parent` with `bindings` defined in it.
    pub fn with_bindings<T, F, I>(&mut self, parent: &Environment, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut scoped = self.scoped_in(parent);
        for (name, value) in bindings {
            scoped.env.define(name, value);
        }
        f(&mut scoped)
    }
}
