//! Statement execution.

use kest_ir::{ElifBranch, Expr, Stmt, StmtKind};
use kest_stack::ensure_sufficient_stack;

use super::{Flow, Interpreter};
use crate::errors::EvalError;
use crate::Value;

impl Interpreter {
    /// Run `statements` in order in the current scope.
    ///
    /// Stops at the first statement that does not complete normally and
    /// hands its flow back. Otherwise the flow carries the last statement's
    /// value, or nil for an empty block.
    pub fn exec_block(&mut self, statements: &[Stmt]) -> Result<Flow, EvalError> {
        let mut last = Value::Nil;
        for stmt in statements {
            match self.exec_stmt(stmt)? {
                Flow::Normal(value) => last = value,
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal(last))
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
            .map_err(|err| err.with_position_if_absent(stmt.position))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.eval_expr(expr).map(Flow::Normal),
            StmtKind::If {
                cond,
                then_branch,
                elifs,
                else_branch,
            } => self.exec_if(cond, then_branch, elifs, else_branch.as_deref()),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.with_env_scope(|scoped| {
                scoped.exec_for(init.as_ref(), cond.as_ref(), post.as_ref(), body)
            }),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::Break => Ok(Flow::Break(stmt.position)),
            StmtKind::Continue => Ok(Flow::Continue(stmt.position)),
        }
    }

    /// `then` and `else` run in a fresh child scope; a matching `elif` runs
    /// in the enclosing scope. When no branch runs, the statement's value
    /// is that of the last condition evaluated.
    fn exec_if(
        &mut self,
        cond: &Expr,
        then_branch: &[Stmt],
        elifs: &[ElifBranch],
        else_branch: Option<&[Stmt]>,
    ) -> Result<Flow, EvalError> {
        let mut last = self.eval_expr(cond)?;
        if last.is_truthy() {
            return self.with_env_scope(|scoped| scoped.exec_block(then_branch));
        }
        for elif in elifs {
            last = self.eval_expr(&elif.cond)?;
            if last.is_truthy() {
                return self.exec_block(&elif.body);
            }
        }
        match else_branch {
            Some(body) => self.with_env_scope(|scoped| scoped.exec_block(body)),
            None => Ok(Flow::Normal(last)),
        }
    }

    /// Loop body. Runs inside the loop's own scope, which `init` binds
    /// into and every iteration shares.
    fn exec_for(
        &mut self,
        init: Option<&Expr>,
        cond: Option<&Expr>,
        post: Option<&Expr>,
        body: &[Stmt],
    ) -> Result<Flow, EvalError> {
        if let Some(init) = init {
            self.eval_expr(init)?;
        }
        loop {
            if let Some(cond) = cond {
                if !self.eval_expr(cond)?.is_truthy() {
                    break;
                }
            }
            match self.exec_block(body)? {
                Flow::Normal(_) | Flow::Continue(_) => {}
                Flow::Break(_) => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
            if let Some(post) = post {
                self.eval_expr(post)?;
            }
        }
        Ok(Flow::Normal(Value::Nil))
    }
}
