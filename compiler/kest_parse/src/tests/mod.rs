//! Parser tests.
//!
//! - `expr.rs`: precedence, associativity, primary forms
//! - `stmt.rs`: statements, blocks, separators
//! - `errors.rs`: error positions and messages


use kest_ir::{Expr, ExprKind, Program, Stmt, StmtKind};

use crate::{parse, ParseError};

pub(crate) fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(err) => panic!("parse failed for {source:?}: {err} at {:?}", err.position),
    }
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("expected parse error for {source:?}, got {program:?}"),
        Err(err) => err,
    }
}

/// The single expression statement of `source` (`;` appended).
pub(crate) fn parse_expr(source: &str) -> Expr {
    let program = parse_ok(&format!("{source};"));
    assert_eq!(program.len(), 1, "expected one statement in {source:?}");
    match program.statements.into_iter().next() {
        Some(Stmt {
            kind: StmtKind::Expr(expr),
            ..
        }) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Compact S-expression rendering of an expression tree.
pub(crate) fn sexp(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Number(text) => text.clone(),
        ExprKind::String(text) => format!("{text:?}"),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Const(c) => format!("{c:?}").to_lowercase(),
        ExprKind::Unary { op, operand } => format!("({op} {})", sexp(operand)),
        ExprKind::Paren(inner) => format!("(paren {})", sexp(inner)),
        ExprKind::Binary { op, left, right } => {
            format!("({op} {} {})", sexp(left), sexp(right))
        }
        ExprKind::Assign { name, value } => format!("(= {name} {})", sexp(value)),
        ExprKind::Function(decl) => format!(
            "(func {} [{}] {})",
            decl.display_name(),
            decl.params.join(" "),
            decl.body.len()
        ),
        ExprKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(sexp).collect();
            format!("(call {callee} {})", args.join(" "))
        }
        ExprKind::Sequence(items) => {
            let items: Vec<String> = items.iter().map(sexp).collect();
            format!("[{}]", items.join(" "))
        }
    }
}
