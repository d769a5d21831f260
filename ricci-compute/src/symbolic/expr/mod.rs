//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](ricci_parser::parser::ast::Expr) type from `ricci_parser` is a recursive `enum`
//! that represents the AST of an expression. It's convenient for parsing, but not so much for
//! algebraic manipulation. [`SymExpr`] flattens sums and products into lists of terms and
//! factors, and represents subtraction and division through multiplication by `-1` and powers of
//! `-1`:
//!
//! - `a - b` is `a + (-1) * b`
//! - `a / b` is `a * b^-1`
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal requires simplification (see
//! [`equals`](super::equals)). The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`]
//! implement a cheaper relation called **strict equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, but `2(r + M)` and `2r + 2M` are **not**
//! strictly equal.

mod convert;
pub mod error;
mod iter;

pub use iter::ExprIter;

use crate::primitive::int;
use rug::{ops::NegAssign, Integer, Rational};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The elementary functions the substrate knows how to differentiate and simplify. Any other
/// call name denotes an undetermined [`Function`].
pub const ELEMENTARY_FUNCTIONS: [&str; 7] = ["sin", "cos", "tan", "cot", "sec", "csc", "sqrt"];

/// Returns true if the given name is one of the [`ELEMENTARY_FUNCTIONS`].
pub fn is_elementary(name: &str) -> bool {
    ELEMENTARY_FUNCTIONS.contains(&name)
}

/// An undetermined function of a single variable, such as `A(r)`, differentiated `order` times
/// with respect to that variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    /// The name of the function.
    pub name: String,

    /// The name of the variable the function depends on.
    pub var: String,

    /// The number of derivatives taken, `0` for the function itself.
    pub order: u8,
}

impl Function {
    /// Creates the (underived) function `name(var)`.
    pub fn new(name: impl Into<String>, var: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var: var.into(),
            order: 0,
        }
    }

    /// Returns the derivative of this function with respect to its variable. Returns [`None`] if
    /// the derivative order would overflow.
    pub fn derivative(&self) -> Option<Self> {
        Some(Self {
            order: self.order.checked_add(1)?,
            ..self.clone()
        })
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}({})", self.name, "'".repeat(self.order as usize), self.var)
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A variable, such as `r` or `theta`.
    Symbol(String),

    /// A call to an elementary function, such as `sin(theta)`.
    Call(String, Vec<SymExpr>),

    /// An undetermined function or one of its derivatives, such as `A''(r)`.
    Function(Function),
}

impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are integers, the integers are added together.
/// Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are integers, the integers are multiplied
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// The integer `0`.
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// The integer `1`.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// Creates an exact rational number: an integer, or a numerator times a power of the
    /// denominator.
    pub fn rational(value: Rational) -> Self {
        let (numerator, denominator) = value.into_numer_denom();
        if denominator == 1 {
            Self::Primary(Primary::Integer(numerator))
        } else {
            Self::Mul(vec![
                Self::Primary(Primary::Integer(numerator)),
                Self::Primary(Primary::Integer(denominator)).recip(),
            ])
        }
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a call to an elementary function.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates an undetermined function (or one of its derivatives).
    pub fn function(function: Function) -> Self {
        Self::Primary(Primary::Function(function))
    }

    /// Returns `sin(self)`.
    pub fn sin(self) -> Self {
        Self::call("sin", vec![self])
    }

    /// Returns `cos(self)`.
    pub fn cos(self) -> Self {
        Self::call("cos", vec![self])
    }

    /// Returns `cot(self)`.
    pub fn cot(self) -> Self {
        Self::call("cot", vec![self])
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::int(-1))
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::call("sqrt", vec![self])
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is literally the integer `0`. This is a syntactic check;
    /// use [`is_zero`](super::is_zero) to decide whether an expression simplifies to zero.
    pub fn is_literal_zero(&self) -> bool {
        self.as_integer().is_some_and(|int| *int == 0)
    }

    /// Returns true if the expression is literally the integer `1`.
    pub fn is_literal_one(&self) -> bool {
        self.as_integer().is_some_and(|int| *int == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression mentions the given variable, either directly or as the
    /// variable of an undetermined function.
    pub fn depends_on(&self, var: &str) -> bool {
        self.post_order_iter().any(|expr| match expr {
            Self::Primary(Primary::Symbol(sym)) => sym == var,
            Self::Primary(Primary::Function(function)) => function.var == var,
            _ => false,
        })
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). The arguments of calls are visited before the call itself.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is the numerator multiplied by the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * denominator.recip()
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
                    && rhs.iter().all(|rhs| lhs.contains(rhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for integer folding and
/// flattening nested sums into one list of terms.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::zero());
        *self = lhs + rhs;
    }
}

/// Subtracts two [`SymExpr`]s, producing `lhs + (-1) * rhs`.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for integer folding
/// and flattening nested products into one list of factors.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::one());
        *self = lhs * rhs;
    }
}

/// Divides two [`SymExpr`]s, producing `lhs * rhs^-1`.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        make_fraction(self, rhs)
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is an integer, or a product with an integer factor, in which case that integer is
/// negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Mul(mut factors) => {
                let coefficient = factors.iter_mut().find_map(|factor| match factor {
                    Self::Primary(Primary::Integer(int)) => Some(int),
                    _ => None,
                });
                if let Some(int) = coefficient {
                    int.neg_assign();
                } else {
                    factors.push(Self::int(-1));
                }
                Self::Mul(factors)
            },
            expr => Self::int(-1) * expr,
        }
    }
}

/// NOTE: Strict equality allows different orderings of terms and factors, but
/// `pretty_assertions` doesn't care about order. If a test fails, expect a noisy diff.
#[cfg(test)]
mod tests {
    use ricci_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(r + (M - 5))");
        let b = parse_expr("(M - 5 + r) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(r + (M - 5))");
        let b = parse_expr("2r + 2M - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("1 - 2M/r");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::int(1),
            SymExpr::Mul(vec![
                SymExpr::int(-2),
                SymExpr::symbol("M"),
                SymExpr::symbol("r").recip(),
            ]),
        ]));
    }

    #[test]
    fn negating_a_product_folds_the_coefficient() {
        let expr = -(SymExpr::int(3) * SymExpr::symbol("r"));
        assert_eq!(expr, SymExpr::Mul(vec![SymExpr::int(-3), SymExpr::symbol("r")]));
    }

    #[test]
    fn functions_and_derivatives() {
        let expr = parse_expr("A''(r) / A(r)");
        let a = Function::new("A", "r");
        let a2 = a.derivative().and_then(|a1| a1.derivative()).unwrap();
        assert_eq!(expr, SymExpr::function(a2) * SymExpr::function(a).recip());
    }

    #[test]
    fn dependence() {
        let expr = parse_expr("B'(r) sin(theta)^2");
        assert!(expr.depends_on("r"));
        assert!(expr.depends_on("theta"));
        assert!(!expr.depends_on("t"));
        assert!(!expr.depends_on("phi"));
    }

    #[test]
    fn decimal_literal_is_exact() {
        let expr = parse_expr("0.5");
        assert_eq!(expr, SymExpr::Mul(vec![SymExpr::int(1), SymExpr::int(2).recip()]));
    }
}
