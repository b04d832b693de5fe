//! Kest IR - shared data types for the Kest interpreter.
//!
//! This crate contains the contract between the phases:
//! - `Position` for line/column source locations
//! - `Token` and `TokenKind` produced by the lexer
//! - AST nodes (`Expr`, `Stmt`, `Program`) produced by the parser and
//!   consumed by the evaluator
//!
//! Every AST node owns its children; there is no arena and no sharing
//! inside the tree. Function bodies sit behind an `Arc` so closures can
//! hold on to them after parsing without copying the body.

pub mod ast;
mod position;
mod token;

pub use ast::{
    BinaryOp, ConstKind, ElifBranch, Expr, ExprKind, FunctionDecl, Program, Stmt, StmtKind,
    UnaryOp,
};
pub use position::Position;
pub use token::{Token, TokenKind};
