//! Function calls.
//!
//! A call names its callee; the name is looked up like any identifier and
//! must resolve to a function. Arguments are evaluated left to right in the
//! caller's scope before the callee runs.

use std::sync::Arc;

use kest_ir::{Expr, Position};
use tracing::debug;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::errors::{not_callable, wrong_arg_count, EvalError, EvalResult};
use crate::value::{Closure, FunctionValue, Value};

impl Interpreter {
    pub(super) fn eval_call(&mut self, callee: &str, args: &[Expr], position: Position) -> EvalResult {
        let function = match self.env.get(callee)? {
            Value::Function(function) => function,
            other => return Err(not_callable(callee, other.kind().name())),
        };
        let args = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<Result<Vec<_>, EvalError>>()?;
        self.call_function(&function, args, position)
    }

    /// Invoke `function` with already evaluated arguments.
    ///
    /// `position` is the call site, recorded in the call stack and used to
    /// locate errors raised by native functions.
    pub fn call_function(
        &mut self,
        function: &FunctionValue,
        args: Vec<Value>,
        position: Position,
    ) -> EvalResult {
        match function {
            FunctionValue::Closure(closure) => self.call_closure(closure, args, position),
            FunctionValue::Native { name, func } => {
                debug!(function = %name, args = args.len(), "native call");
                func(&args).map_err(|err| err.with_position_if_absent(position))
            }
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = closure.decl.display_name(), depth = self.call_stack.depth())
    )]
    fn call_closure(&mut self, closure: &Arc<Closure>, args: Vec<Value>, position: Position) -> EvalResult {
        let decl = &closure.decl;
        if args.len() != decl.params.len() {
            return Err(wrong_arg_count(
                decl.display_name(),
                decl.params.len(),
                args.len(),
            ));
        }

        self.call_stack.push(CallFrame {
            function: Arc::clone(decl),
            call_position: position,
        })?;
        let bindings = decl.params.iter().cloned().zip(args);
        // Resolve the flow before the activation scope is released; a
        // discarded body value must not count as a capture.
        let result = self.with_bindings(&closure.env, bindings, |scoped| {
            scoped
                .exec_block(&decl.body)?
                .into_value(|_| Value::Nil)
        });
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();
        result
    }
}
