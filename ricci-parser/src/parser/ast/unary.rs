use crate::parser::{
    ast::{binary::Binary, expr::{Expr, Primary}},
    error::Error,
    token::op::UnaryOp,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-r`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    ///
    /// The operand of a unary operator absorbs every binary operator that binds more tightly
    /// than the unary operator, so `-r^2` parses as `-(r^2)`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Ok(op) = input.try_parse::<UnaryOp>() else {
            return input.try_parse::<Primary>().map(Expr::from);
        };

        let operand = input.try_parse_with_fn(Self::parse_or_lower)?;
        let operand = Binary::parse_expr(input, operand, op.precedence())?;
        let span = op.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.operand.needs_parens(self.op.precedence()) {
            write!(f, "-({})", self.operand)
        } else {
            write!(f, "-{}", self.operand)
        }
    }
}
