//! Unary operator implementations for the evaluator.

use kest_ir::UnaryOp;

use crate::errors::{integer_overflow, EvalResult};
use crate::Value;

/// Evaluate a prefix operator.
///
/// `+` keeps numbers as they are and coerces anything else to an integer.
/// `-` negates, coercing non-floats to an integer first. `!` negates
/// truthiness and always yields a bool.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (op, value) {
        (UnaryOp::Plus, v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        (UnaryOp::Plus, v) => Ok(Value::Int(v.to_int())),

        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, v) => v
            .to_int()
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),

        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
    }
}
