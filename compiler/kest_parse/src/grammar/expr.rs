//! Expression parsing.
//!
//! Precedence, lowest first:
//!
//! | Level          | Operators            |
//! |----------------|----------------------|
//! | assignment     | `ident = expr`       |
//! | logical or     | `\|\|`               |
//! | logical and    | `&&`                 |
//! | bitwise or     | `\|`                 |
//! | bitwise and    | `&`                  |
//! | equality       | `==` `!=`            |
//! | relational     | `>` `>=` `<` `<=`    |
//! | additive       | `+` `-`              |
//! | multiplicative | `*` `/` `%`          |
//! | unary          | `+` `-` `!` (prefix) |
//!
//! Every binary level is right-leaning.

use std::sync::Arc;

use kest_ir::{BinaryOp, ConstKind, Expr, ExprKind, FunctionDecl, TokenKind, UnaryOp};
use kest_lexer::{cook_string_literal, TokenSource};
use kest_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

type Level<S> = fn(&mut Parser<S>) -> Result<Expr, ParseError>;

impl<S: TokenSource> Parser<S> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// `ident = expr`, recognized only with `Ident` then `=` in the
    /// lookahead buffer.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Ident) && self.peek2_kind()? == TokenKind::Eq {
            let position = self.current_position();
            let name = self.advance()?.text;
            self.advance()?; // `=`
            let value = self.parse_expr()?;
            return Ok(Expr::new(
                ExprKind::Assign {
                    name,
                    value: Box::new(value),
                },
                position,
            ));
        }
        self.parse_or()
    }

    /// One right-leaning binary level.
    ///
    /// `left` parses the left operand; the right operand is parsed with
    /// `this`, the level itself.
    fn parse_binary_level(
        &mut self,
        left: Level<S>,
        this: Level<S>,
        op_for: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let lhs = left(self)?;
        let Some(op) = op_for(self.current_kind()) else {
            return Ok(lhs);
        };
        self.advance()?;
        let rhs = ensure_sufficient_stack(|| this(self))?;
        let position = lhs.position;
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
            position,
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_and, Self::parse_or, |kind| match kind {
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bit_or, Self::parse_and, |kind| match kind {
            TokenKind::AmpAmp => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_bit_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bit_and, Self::parse_bit_or, |kind| match kind {
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    fn parse_bit_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, Self::parse_bit_and, |kind| {
            match kind {
                TokenKind::Amp => Some(BinaryOp::BitAnd),
                _ => None,
            }
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_relational, Self::parse_equality, |kind| {
            match kind {
                TokenKind::EqEq => Some(BinaryOp::Eq),
                TokenKind::NotEq => Some(BinaryOp::NotEq),
                _ => None,
            }
        })
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, Self::parse_relational, |kind| {
            match kind {
                TokenKind::Gt => Some(BinaryOp::Gt),
                TokenKind::GtEq => Some(BinaryOp::GtEq),
                TokenKind::Lt => Some(BinaryOp::Lt),
                TokenKind::LtEq => Some(BinaryOp::LtEq),
                _ => None,
            }
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, Self::parse_additive, |kind| {
            match kind {
                TokenKind::Plus => Some(BinaryOp::Add),
                TokenKind::Minus => Some(BinaryOp::Sub),
                _ => None,
            }
        })
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, Self::parse_multiplicative, |kind| {
            match kind {
                TokenKind::Star => Some(BinaryOp::Mul),
                TokenKind::Slash => Some(BinaryOp::Div),
                TokenKind::Percent => Some(BinaryOp::Mod),
                _ => None,
            }
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        let position = self.current_position();
        self.advance()?;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            position,
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.current_position();
        trace!(kind = %self.current_kind(), "parse_primary");

        let kind = match self.current_kind() {
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                ExprKind::Paren(Box::new(inner))
            }
            TokenKind::Number => ExprKind::Number(self.advance()?.text),
            TokenKind::String => {
                let token = self.advance()?;
                ExprKind::String(cook_string_literal(&token.text, token.position)?)
            }
            TokenKind::True => {
                self.advance()?;
                ExprKind::Const(ConstKind::True)
            }
            TokenKind::False => {
                self.advance()?;
                ExprKind::Const(ConstKind::False)
            }
            TokenKind::Nil => {
                self.advance()?;
                ExprKind::Const(ConstKind::Nil)
            }
            TokenKind::Ident => {
                let name = self.advance()?.text;
                if self.check(TokenKind::LParen) {
                    self.advance()?;
                    let args = self.parse_expr_list(TokenKind::RParen)?;
                    ExprKind::Call { callee: name, args }
                } else {
                    ExprKind::Ident(name)
                }
            }
            TokenKind::Func => ExprKind::Function(Arc::new(self.parse_function_literal()?)),
            TokenKind::LBracket => {
                self.advance()?;
                ExprKind::Sequence(self.parse_expr_list(TokenKind::RBracket)?)
            }
            _ => return Err(ParseError::expected_expression(self.current())),
        };
        Ok(Expr::new(kind, position))
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_expr_list(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if !self.check(close) {
            loop {
                items.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    /// `func [name] ( params ) block`
    fn parse_function_literal(&mut self) -> Result<FunctionDecl, ParseError> {
        let position = self.current_position();
        self.expect(TokenKind::Func)?;

        let name = if self.check(TokenKind::Ident) {
            Some(self.advance()?.text)
        } else {
            None
        };

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            params.push(self.expect_ident()?);
            while self.eat(TokenKind::Comma)? {
                params.push(self.expect_ident()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(FunctionDecl {
            name,
            params,
            body,
            position,
        })
    }
}
