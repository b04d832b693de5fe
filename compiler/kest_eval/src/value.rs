//! Runtime values and their coercions.
//!
//! Kest is dynamically typed. Every operator accepts every kind of operand
//! and coerces through the helpers here: [`Value::to_int`],
//! [`Value::to_float`], [`Value::is_truthy`] and the `Display` string form.

use std::fmt;
use std::sync::Arc;

use kest_ir::FunctionDecl;

use crate::errors::{malformed_numeral, EvalError};
use crate::Environment;

/// Signature of a host-provided native function.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
    Function(FunctionValue),
    Sequence(Vec<Value>),
}

/// Kind tag of a [`Value`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Str,
    Bool,
    Nil,
    Function,
    Sequence,
}

impl ValueKind {
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Bool => "bool",
            ValueKind::Nil => "nil",
            ValueKind::Function => "function",
            ValueKind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A callable value.
#[derive(Clone)]
pub enum FunctionValue {
    /// A function literal together with the scope it was defined in.
    Closure(Arc<Closure>),
    /// A function supplied by the host.
    Native {
        name: Arc<str>,
        func: Arc<NativeFn>,
    },
}

/// A user-defined function closed over its defining scope.
pub struct Closure {
    pub decl: Arc<FunctionDecl>,
    pub env: Environment,
}

impl FunctionValue {
    pub fn name(&self) -> &str {
        match self {
            FunctionValue::Closure(closure) => closure.decl.display_name(),
            FunctionValue::Native { name, .. } => name,
        }
    }

    /// Identity comparison: two function values are equal only when they
    /// are the same closure or the same native.
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        match (self, other) {
            (FunctionValue::Closure(a), FunctionValue::Closure(b)) => Arc::ptr_eq(a, b),
            (FunctionValue::Native { func: a, .. }, FunctionValue::Native { func: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl Value {
    /// Wrap a host function as a callable value.
    pub fn native<F>(name: &str, func: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Value::Function(FunctionValue::Native {
            name: Arc::from(name),
            func: Arc::new(func),
        })
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Bool(_) => ValueKind::Bool,
            Value::Nil => ValueKind::Nil,
            Value::Function(_) => ValueKind::Function,
            Value::Sequence(_) => ValueKind::Sequence,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Truthiness used by conditions, `!`, `&&` and `||`.
    ///
    /// Numbers are truthy when non-zero and booleans are themselves. A
    /// string is truthy when it is `"true"` or spells a non-zero integer.
    /// Everything else is falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => s == "true" || parse_int_str(s).is_some_and(|n| n != 0),
            Value::Nil | Value::Function(_) | Value::Sequence(_) => false,
        }
    }

    /// Integer coercion. Floats truncate toward zero, strings parse as
    /// decimal or `0x` hexadecimal, and anything unparseable is 0.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int coercion truncates and saturates"
    )]
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) => *f as i64,
            Value::Str(s) => parse_int_str(s).unwrap_or(0),
            Value::Bool(_) | Value::Nil | Value::Function(_) | Value::Sequence(_) => 0,
        }
    }

    /// Float coercion. Only numbers convert; everything else is 0.0.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float coercion is lossy above 2^53"
    )]
    pub fn to_float(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(f) => *f,
            _ => 0.0,
        }
    }
}

fn parse_int_str(s: &str) -> Option<i64> {
    match s.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Value of a number literal.
///
/// `0x` literals are hexadecimal integers; a literal containing `.`, `e`
/// or `E` is a float; anything else is a decimal integer. A literal that
/// does not fit its kind is an error.
pub fn parse_numeral(text: &str) -> Result<Value, EvalError> {
    if let Some(hex) = text.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16)
            .map(Value::Int)
            .map_err(|_| malformed_numeral(text));
    }
    if text.contains(['.', 'e', 'E']) {
        return text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| malformed_numeral(text));
    }
    text.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| malformed_numeral(text))
}

/// Structural equality. Values of different kinds are never equal, so
/// `1 == 1.0` is false; functions compare by identity.
impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "floats compare exactly")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nil => f.write_str("nil"),
            Value::Function(func) => write!(f, "<func {}>", func.name()),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Nil => f.write_str("Nil"),
            Value::Function(func) => write!(f, "Function({})", func.name()),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
