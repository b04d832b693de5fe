//! The tree-walking interpreter.
//!
//! # Module structure
//!
//! - `builder`: [`InterpreterBuilder`] configuration
//! - `scope_guard`: RAII scope entry and release
//! - `exec`: statements and blocks
//! - `call`: function calls

mod builder;
mod call;
mod exec;
mod scope_guard;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use scope_guard::ScopedInterpreter;

use std::sync::Arc;

use kest_ir::{ConstKind, Expr, ExprKind, FunctionDecl, Position, Program};
use kest_stack::ensure_sufficient_stack;

use crate::diagnostics::CallStack;
use crate::errors::{unexpected_break, unexpected_continue, EvalError, EvalResult};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::{parse_numeral, Closure, FunctionValue, Value};
use crate::{Environment, SharedPrintHandler};

/// Outcome of executing a statement or block.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Execution continues; carries the value of the last statement.
    Normal(Value),
    /// `return` is unwinding to the nearest call boundary.
    Return(Value),
    /// `break` is unwinding to the nearest loop.
    Break(Position),
    /// `continue` is unwinding to the nearest loop.
    Continue(Position),
}

impl Flow {
    /// Resolve a flow that reached a call boundary or the top level.
    ///
    /// `Normal` yields `fallthrough`, `Return` yields its value, and a
    /// loop signal with no loop left to catch it is an error.
    pub(crate) fn into_value(self, fallthrough: impl FnOnce(Value) -> Value) -> EvalResult {
        match self {
            Flow::Normal(value) => Ok(fallthrough(value)),
            Flow::Return(value) => Ok(value),
            Flow::Break(position) => Err(unexpected_break().with_position(position)),
            Flow::Continue(position) => Err(unexpected_continue().with_position(position)),
        }
    }
}

/// Who releases the root environment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScopeOwnership {
    /// The interpreter created the root and destroys it on drop.
    Owned,
    /// The host supplied the root and keeps it alive.
    Borrowed,
}

/// Tree-walking interpreter.
pub struct Interpreter {
    /// Scope that statements currently execute in.
    pub(crate) env: Environment,
    global: Environment,
    pub(crate) call_stack: CallStack,
    print_handler: SharedPrintHandler,
    scope_ownership: ScopeOwnership,
}

impl Interpreter {
    /// An interpreter with a fresh root scope and default settings.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// The root scope, where hosts register built-ins.
    pub fn global_env(&self) -> &Environment {
        &self.global
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Number of user-defined calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Run `program` in the root scope.
    ///
    /// The result is the value of the last statement executed, or the
    /// value of a top-level `return`, which also ends the program.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.len()))]
    pub fn evaluate(&mut self, program: &Program) -> EvalResult {
        self.exec_block(&program.statements)?.into_value(|value| value)
    }

    /// Evaluate one expression in the current scope.
    ///
    /// Errors are located at `expr` unless a nested node already set a
    /// position.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|err| err.with_position_if_absent(expr.position))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Number(text) => parse_numeral(text),
            ExprKind::String(text) => Ok(Value::Str(text.clone())),
            ExprKind::Ident(name) => self.env.get(name),
            ExprKind::Const(ConstKind::True) => Ok(Value::Bool(true)),
            ExprKind::Const(ConstKind::False) => Ok(Value::Bool(false)),
            ExprKind::Const(ConstKind::Nil) => Ok(Value::Nil),
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(value, *op)
            }
            ExprKind::Binary { op, left, right } => {
                // Both sides are evaluated even for `&&` and `||`.
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
            ExprKind::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.assign(name, value.clone());
                Ok(value)
            }
            ExprKind::Function(decl) => Ok(self.define_function(decl)),
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.position),
            ExprKind::Sequence(items) => items
                .iter()
                .map(|item| self.eval_expr(item))
                .collect::<Result<Vec<_>, EvalError>>()
                .map(Value::Sequence),
        }
    }

    /// Close `decl` over the current scope, binding it there if named.
    fn define_function(&mut self, decl: &Arc<FunctionDecl>) -> Value {
        let function = Value::Function(FunctionValue::Closure(Arc::new(Closure {
            decl: Arc::clone(decl),
            env: self.env.clone(),
        })));
        if let Some(name) = &decl.name {
            self.env.define(name.as_str(), function.clone());
        }
        function
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        if self.scope_ownership == ScopeOwnership::Owned {
            self.global.destroy();
        }
    }
}

#[cfg(test)]
mod tests;
