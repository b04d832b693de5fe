//! AST node types.
//!
//! Two node families, expressions and statements, each wrapping a `*Kind`
//! enum together with the position of the node's first token. The tree is
//! built once by the parser and only read by the evaluator, which may walk
//! the same node many times (loop bodies, function bodies).

use std::fmt;
use std::sync::Arc;

use crate::Position;

/// Binary operators, in the order of the precedence ladder (lowest first).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Bitwise
    BitOr,
    BitAnd,

    // Equality
    Eq,
    NotEq,

    // Relational
    Gt,
    GtEq,
    Lt,
    LtEq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    /// Returns `true` for `>`, `>=`, `<`, `<=`.
    pub const fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Gt | BinaryOp::GtEq | BinaryOp::Lt | BinaryOp::LtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// The reserved constant literals.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstKind {
    True,
    False,
    Nil,
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Expr { kind, position }
    }

    /// Returns `true` if this is a function literal.
    ///
    /// A statement consisting of a function literal needs no trailing `;`.
    pub fn is_function_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Function(_))
    }
}

/// Dropping is iterative: a long operator chain or deep parenthesis nesting
/// would otherwise overflow the native stack through nested `Box` drops.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.kind.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.kind.take_children(&mut pending);
        }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Numeric literal, kept as written. Interpreted at evaluation time.
    Number(String),
    /// String literal with escapes already cooked.
    String(String),
    /// Bare reference to a name.
    Ident(String),
    /// `true`, `false` or `nil`.
    Const(ConstKind),
    /// Prefix operator application.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `( inner )`
    Paren(Box<Expr>),
    /// Binary operator application.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `name = value`
    Assign { name: String, value: Box<Expr> },
    /// `func [name](params) { body }`
    Function(Arc<FunctionDecl>),
    /// `callee(args...)`
    Call { callee: String, args: Vec<Expr> },
    /// `[a, b, ...]`
    Sequence(Vec<Expr>),
}

impl ExprKind {
    /// Move the directly nested expressions into `out`, leaving
    /// childless placeholders behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match self {
            ExprKind::Unary { operand: inner, .. }
            | ExprKind::Paren(inner)
            | ExprKind::Assign { value: inner, .. } => out.push(take_boxed(inner)),
            ExprKind::Binary { left, right, .. } => {
                out.push(take_boxed(left));
                out.push(take_boxed(right));
            }
            ExprKind::Call { args: items, .. } | ExprKind::Sequence(items) => out.append(items),
            ExprKind::Number(_)
            | ExprKind::String(_)
            | ExprKind::Ident(_)
            | ExprKind::Const(_)
            | ExprKind::Function(_) => {}
        }
    }
}

fn take_boxed(slot: &mut Expr) -> Expr {
    let placeholder = Expr::new(ExprKind::Const(ConstKind::Nil), slot.position);
    std::mem::replace(slot, placeholder)
}

/// A function literal.
///
/// Shared through an `Arc` so that closures created from it at run time
/// can keep the body alive without cloning the statements.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl FunctionDecl {
    /// Name for diagnostics and display; anonymous literals show as `<anonymous>`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Stmt { kind, position }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// An expression evaluated for its value or effect.
    Expr(Expr),
    /// `if cond { } elif cond { } else { }`
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        elifs: Vec<ElifBranch>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// `for init; cond; post { }` with every clause optional.
    For {
        init: Option<Expr>,
        cond: Option<Expr>,
        post: Option<Expr>,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
}

/// One `elif` clause of an if statement.
#[derive(Clone, Debug, PartialEq)]
pub struct ElifBranch {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub position: Position,
}

/// A parsed source file: its top-level statements in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
