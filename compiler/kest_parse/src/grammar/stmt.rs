//! Statement and block parsing.
//!
//! Statements are separated by line breaks; a stray `;` between
//! statements is skipped the same way. Expression statements end in `;`
//! unless the expression is a function literal.

use kest_ir::{ElifBranch, Stmt, StmtKind, TokenKind};
use kest_lexer::TokenSource;

use crate::{ParseError, Parser};

impl<S: TokenSource> Parser<S> {
    /// Skip `Eol` and empty `;` statements.
    pub(crate) fn skip_separators(&mut self) -> Result<(), ParseError> {
        while self.check(TokenKind::Eol) || self.check(TokenKind::Semicolon) {
            self.advance()?;
        }
        Ok(())
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.current_position();
        let kind = match self.current_kind() {
            TokenKind::If => self.parse_if()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Break => {
                self.advance()?;
                self.eat(TokenKind::Semicolon)?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance()?;
                self.eat(TokenKind::Semicolon)?;
                StmtKind::Continue
            }
            _ => {
                let expr = self.parse_expr()?;
                if !expr.is_function_literal() {
                    self.expect(TokenKind::Semicolon)?;
                }
                StmtKind::Expr(expr)
            }
        };
        Ok(Stmt::new(kind, position))
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        loop {
            self.skip_separators()?;
            if self.check(TokenKind::RBrace) || self.cursor.is_at_end() {
                break;
            }
            statements.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(statements)
    }

    /// `if cond block {elif cond block} [else block]`
    ///
    /// Line breaks between a closing `}` and `elif`/`else` are allowed.
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then_branch = self.parse_block()?;

        let mut elifs = Vec::new();
        let mut else_branch = None;
        loop {
            self.cursor.skip_newlines()?;
            match self.current_kind() {
                TokenKind::Elif => {
                    let position = self.current_position();
                    self.advance()?;
                    let cond = self.parse_expr()?;
                    let body = self.parse_block()?;
                    elifs.push(ElifBranch {
                        cond,
                        body,
                        position,
                    });
                }
                TokenKind::Else => {
                    self.advance()?;
                    else_branch = Some(self.parse_block()?);
                    break;
                }
                _ => break,
            }
        }

        Ok(StmtKind::If {
            cond,
            then_branch,
            elifs,
            else_branch,
        })
    }

    /// `for [init] ; [cond] ; [post] block`
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::For)?;

        let init = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let post = if self.check(TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let body = self.parse_block()?;
        Ok(StmtKind::For {
            init,
            cond,
            post,
            body,
        })
    }

    /// `return [expr] [;]`
    ///
    /// The value is absent when the keyword is directly followed by a
    /// statement boundary.
    fn parse_return(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::Return)?;
        let value = match self.current_kind() {
            TokenKind::Semicolon | TokenKind::Eol | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expr()?),
        };
        self.eat(TokenKind::Semicolon)?;
        Ok(StmtKind::Return(value))
    }
}
