//! Tree-walking evaluator for Kest.
//!
//! The [`Interpreter`] executes a parsed [`Program`](kest_ir::Program)
//! directly against a chain of [`Environment`]s. Values are dynamically
//! typed; operators coerce mismatched operands instead of failing (see
//! [`operators`]). `return`, `break` and `continue` travel as [`Flow`]
//! signals, never through the error channel.
//!
//! # Architecture
//!
//! - `value`: the closed set of runtime kinds and their coercions
//! - `environment`: lexical scopes behind shared, individually locked handles
//! - `operators`, `unary_operators`: operator dispatch
//! - `interpreter`: statement execution, expression evaluation, calls
//! - `print_handler`: output destination for host `print` built-ins

mod diagnostics;
mod environment;
mod errors;
pub mod interpreter;
pub mod operators;
mod print_handler;
pub mod unary_operators;
mod value;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::Environment;
pub use errors::{
    builtin_error, call_depth_exceeded, integer_overflow, malformed_numeral, modulo_by_zero,
    not_callable, undefined_symbol, undefined_type, unexpected_break, unexpected_continue,
    unknown_symbol, wrong_arg_count, BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult,
};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{parse_numeral, Closure, FunctionValue, NativeFn, Value, ValueKind};
