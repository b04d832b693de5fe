//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::{Interpreter, ScopeOwnership};
use crate::diagnostics::CallStack;
use crate::{stdout_handler, Environment, SharedPrintHandler};

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`] instances.
///
/// ```text
/// let globals = Environment::new();
/// globals.define("answer", Value::Int(42));
/// let mut interp = InterpreterBuilder::new()
///     .env(globals)
///     .max_call_depth(500)
///     .print_handler(buffer_handler())
///     .build();
/// ```
pub struct InterpreterBuilder {
    env: Option<Environment>,
    max_call_depth: usize,
    print_handler: Option<SharedPrintHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            env: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: None,
        }
    }

    /// Use `env` as the root scope.
    ///
    /// The caller keeps ownership: the interpreter does not destroy a
    /// supplied root when it is dropped.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Maximum number of nested user-defined calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Output destination for print built-ins. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        let (global, scope_ownership) = match self.env {
            Some(env) => (env, ScopeOwnership::Borrowed),
            None => (Environment::new(), ScopeOwnership::Owned),
        };
        Interpreter {
            env: global.clone(),
            global,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            scope_ownership,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
