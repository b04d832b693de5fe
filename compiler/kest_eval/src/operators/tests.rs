use super::*;
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;

fn bin(left: impl Into<Value>, op: BinaryOp, right: impl Into<Value>) -> Value {
    match evaluate_binary(left.into(), right.into(), op) {
        Ok(value) => value,
        Err(err) => panic!("{op} failed: {err}"),
    }
}

fn seq(items: &[i64]) -> Value {
    Value::Sequence(items.iter().copied().map(Value::Int).collect())
}

// ─── Addition ladder ─────────────────────────────────────────────────────────

#[test]
fn add_string_wins() {
    assert_eq!(bin("a", BinaryOp::Add, 1), Value::from("a1"));
    assert_eq!(bin(1, BinaryOp::Add, "a"), Value::from("1a"));
    assert_eq!(bin("x", BinaryOp::Add, Value::Nil), Value::from("xnil"));
    assert_eq!(bin(seq(&[1]), BinaryOp::Add, "s"), Value::from("[1]s"));
}

#[test]
fn add_sequences() {
    assert_eq!(bin(seq(&[1, 2]), BinaryOp::Add, 3), seq(&[1, 2, 3]));
    assert_eq!(bin(seq(&[1]), BinaryOp::Add, seq(&[2, 3])), seq(&[1, 2, 3]));
    assert_eq!(bin(0, BinaryOp::Add, seq(&[1])), seq(&[0, 1]));
}

#[test]
fn add_numbers() {
    assert_eq!(bin(2, BinaryOp::Add, 3), Value::Int(5));
    assert_eq!(bin(2, BinaryOp::Add, 0.5), Value::Float(2.5));
    assert_eq!(bin(true, BinaryOp::Add, 1), Value::Int(1));
}

#[test]
fn add_overflow_is_error() {
    let err = evaluate_binary(Value::Int(i64::MAX), Value::Int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: "addition".to_string()
        }
    );
}

// ─── Other arithmetic ────────────────────────────────────────────────────────

#[test]
fn sub_and_mul() {
    assert_eq!(bin(10, BinaryOp::Sub, 4), Value::Int(6));
    assert_eq!(bin(1.5, BinaryOp::Sub, 1), Value::Float(0.5));
    assert_eq!(bin(6, BinaryOp::Mul, 7), Value::Int(42));
    assert_eq!(bin(2, BinaryOp::Mul, 1.5), Value::Float(3.0));
    assert_eq!(bin("9", BinaryOp::Sub, 2), Value::Int(7));
}

#[test]
fn string_repetition() {
    assert_eq!(bin("ab", BinaryOp::Mul, 3), Value::from("ababab"));
    assert_eq!(bin("ab", BinaryOp::Mul, -1), Value::from(""));
}

#[test]
fn division_is_float() {
    assert_eq!(bin(7, BinaryOp::Div, 2), Value::Float(3.5));
    assert_eq!(bin(1, BinaryOp::Div, 0), Value::Float(f64::INFINITY));
}

#[test]
fn modulo() {
    assert_eq!(bin(7, BinaryOp::Mod, 3), Value::Int(1));
    assert_eq!(bin(7.9, BinaryOp::Mod, 3), Value::Int(1));
    let err = evaluate_binary(Value::Int(1), Value::Int(0), BinaryOp::Mod).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn bitwise() {
    assert_eq!(bin(6, BinaryOp::BitAnd, 3), Value::Int(2));
    assert_eq!(bin(6, BinaryOp::BitOr, 3), Value::Int(7));
}

// ─── Comparison ──────────────────────────────────────────────────────────────

#[test]
fn relational_compares_as_float() {
    assert_eq!(bin(2, BinaryOp::Gt, 1.5), Value::Bool(true));
    assert_eq!(bin(2, BinaryOp::GtEq, 2), Value::Bool(true));
    assert_eq!(bin(1, BinaryOp::Lt, 1), Value::Bool(false));
    assert_eq!(bin(1, BinaryOp::LtEq, 1.0), Value::Bool(true));
    // Strings coerce to 0.0.
    assert_eq!(bin("5", BinaryOp::Gt, 0), Value::Bool(false));
}

#[test]
fn equality() {
    assert_eq!(bin(Value::Nil, BinaryOp::Eq, Value::Nil), Value::Bool(true));
    assert_eq!(bin(Value::Nil, BinaryOp::Eq, 0), Value::Bool(false));
    assert_eq!(bin("a", BinaryOp::Eq, "a"), Value::Bool(true));
    assert_eq!(bin(1, BinaryOp::NotEq, 1.0), Value::Bool(true));
    assert_eq!(bin(seq(&[1]), BinaryOp::Eq, seq(&[1])), Value::Bool(true));
}

// ─── Logical ─────────────────────────────────────────────────────────────────

#[test]
fn logical_operators_return_an_operand() {
    assert_eq!(bin(0, BinaryOp::Or, "x"), Value::from("x"));
    assert_eq!(bin(3, BinaryOp::Or, "x"), Value::Int(3));
    assert_eq!(bin(3, BinaryOp::And, "x"), Value::from("x"));
    assert_eq!(bin(Value::Nil, BinaryOp::And, "x"), Value::Nil);
}
