//! Grammar productions, split by node family.
//!
//! - `expr.rs`: assignment, the binary precedence ladder, unary, primary
//! - `stmt.rs`: statements, blocks, separators

mod expr;
mod stmt;
