use crate::{
    parser::{
        ast::{expr::Expr, literal::Literal, unary::Unary},
        error::Error,
        token::op::{BinOp, BinOpKind},
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the operator that follows an expression ending at `lhs_end`, without consuming it.
    ///
    /// If the next token starts a primary expression, an implicit multiplication operator is
    /// returned, spanning the gap between the two operands.
    fn peek_op(input: &Parser, lhs_end: usize) -> Option<BinOp> {
        let token = input.peek_token()?;
        let kind = match token.kind {
            TokenKind::Exp => BinOpKind::Exp,
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            kind if kind.starts_primary() => {
                return Some(BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs_end..token.span.start,
                });
            },
            _ => return None,
        };

        Some(BinOp {
            kind,
            implicit: false,
            span: token.span.clone(),
        })
    }

    /// Parses the binary operators following `lhs`, consuming every operator that binds more
    /// tightly than `precedence`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::peek_op(input, lhs.span().end) {
            if op.precedence() <= precedence {
                break;
            }

            if !op.implicit {
                input.next_token()?;
            }

            let rhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
            let rhs_precedence = match op.associativity() {
                Associativity::Left => op.precedence(),
                Associativity::Right => op.precedence().lower(),
            };
            let rhs = Self::parse_expr(input, rhs, rhs_precedence)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Self {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

/// Writes an operand, wrapping it in parentheses if it binds more loosely than the operator.
fn fmt_operand(f: &mut fmt::Formatter, operand: &Expr, precedence: Precedence) -> fmt::Result {
    if operand.needs_parens(precedence) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let precedence = self.op.precedence();
        fmt_operand(f, &self.lhs, precedence)?;

        if self.op.implicit {
            // a number coefficient is written directly against its factor, like `2M`
            let numeric_lhs = matches!(
                self.lhs.as_ref(),
                Expr::Literal(Literal::Integer(_) | Literal::Float(_)),
            );
            let numeric_rhs = matches!(
                self.rhs.innermost(),
                Expr::Literal(Literal::Integer(_) | Literal::Float(_)),
            );
            if !numeric_lhs || numeric_rhs {
                write!(f, " ")?;
            }
        } else if self.op.kind == BinOpKind::Exp {
            write!(f, "{}", self.op.kind.symbol())?;
        } else {
            write!(f, " {} ", self.op.kind.symbol())?;
        }

        fmt_operand(f, &self.rhs, precedence)
    }
}
