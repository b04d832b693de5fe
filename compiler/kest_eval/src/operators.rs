//! Binary operator implementations for the evaluator.
//!
//! Operands of every kind are accepted. The coercion ladder picks the
//! evaluation strategy from the operand kinds:
//!
//! | operator          | strategy                                                      |
//! |-------------------|---------------------------------------------------------------|
//! | `+`               | string concat, else sequence append, else float, else integer |
//! | `-` `*`           | float if either side is a float, else integer                 |
//! | `/`               | always float                                                  |
//! | `%` `\|` `&`      | integer                                                       |
//! | `>` `>=` `<` `<=` | compare as float                                              |
//! | `==` `!=`         | structural equality                                           |
//! | `&&` `\|\|`       | pick one operand by truthiness                                |
//!
//! Integer arithmetic is checked: overflow is an error, not a wrap.

use kest_ir::BinaryOp;

use crate::errors::{integer_overflow, modulo_by_zero, EvalResult};
use crate::Value;

/// Checked arithmetic result, mapping `None` to an overflow error.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Checked modulo with zero guard.
#[inline]
fn checked_mod(left: i64, right: i64) -> EvalResult {
    if right == 0 {
        Err(modulo_by_zero())
    } else {
        checked_arith(left.checked_rem(right), "remainder")
    }
}

fn either_float(left: &Value, right: &Value) -> bool {
    matches!(left, Value::Float(_)) || matches!(right, Value::Float(_))
}

/// Evaluate a binary operation. Both operands are already evaluated.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }),

        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => {
            if either_float(&left, &right) {
                Ok(Value::Float(left.to_float() - right.to_float()))
            } else {
                checked_arith(left.to_int().checked_sub(right.to_int()), "subtraction")
            }
        }
        BinaryOp::Mul => eval_mul(&left, &right),
        BinaryOp::Div => Ok(Value::Float(left.to_float() / right.to_float())),
        BinaryOp::Mod => checked_mod(left.to_int(), right.to_int()),

        BinaryOp::BitOr => Ok(Value::Int(left.to_int() | right.to_int())),
        BinaryOp::BitAnd => Ok(Value::Int(left.to_int() & right.to_int())),

        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),

        BinaryOp::Gt => Ok(Value::Bool(left.to_float() > right.to_float())),
        BinaryOp::GtEq => Ok(Value::Bool(left.to_float() >= right.to_float())),
        BinaryOp::Lt => Ok(Value::Bool(left.to_float() < right.to_float())),
        BinaryOp::LtEq => Ok(Value::Bool(left.to_float() <= right.to_float())),
    }
}

fn eval_add(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Str(mut l), r) => {
            l.push_str(&r.to_string());
            Ok(Value::Str(l))
        }
        (l, Value::Str(r)) => Ok(Value::Str(format!("{l}{r}"))),
        (Value::Sequence(mut l), Value::Sequence(r)) => {
            l.extend(r);
            Ok(Value::Sequence(l))
        }
        (Value::Sequence(mut l), r) => {
            l.push(r);
            Ok(Value::Sequence(l))
        }
        (l, Value::Sequence(mut r)) => {
            r.insert(0, l);
            Ok(Value::Sequence(r))
        }
        (l, r) if either_float(&l, &r) => Ok(Value::Float(l.to_float() + r.to_float())),
        (l, r) => checked_arith(l.to_int().checked_add(r.to_int()), "addition"),
    }
}

fn eval_mul(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        // String repetition; a negative count gives the empty string.
        (Value::Str(s), Value::Int(n)) => {
            let count = usize::try_from(*n).unwrap_or(0);
            Ok(Value::Str(s.repeat(count)))
        }
        (l, r) if either_float(l, r) => Ok(Value::Float(l.to_float() * r.to_float())),
        (l, r) => checked_arith(l.to_int().checked_mul(r.to_int()), "multiplication"),
    }
}

#[cfg(test)]
mod tests;
