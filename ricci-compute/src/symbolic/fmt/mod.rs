//! Rendering of expressions as plain text and LaTeX.
//!
//! Both renderings read an expression the way it would be written by hand: each term of a sum is
//! split into a sign, an integer coefficient, the factors of its numerator, and the factors of its
//! denominator (factors raised to a negative integer power). `r * A(r)^-1 * -2` is rendered as
//! `-2 * r / A(r)`, and in LaTeX as `-\frac{2 r}{A{\left(r \right)}}`.

mod latex;

use rug::Integer;
use std::fmt::{Display, Formatter, Result};
use super::expr::{Primary, SymExpr};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// A term of a sum, split into the parts it is rendered from.
#[derive(Debug)]
pub(crate) struct Product<'a> {
    /// Whether the term is negative.
    pub(crate) negative: bool,

    /// The absolute value of the product of the integer factors.
    pub(crate) coefficient: Integer,

    /// The remaining factors of the numerator, in order.
    pub(crate) numerator: Vec<&'a SymExpr>,

    /// The factors of the denominator, with their (positive) exponents.
    pub(crate) denominator: Vec<(&'a SymExpr, Integer)>,
}

impl<'a> Product<'a> {
    /// Splits a term into its parts.
    pub(crate) fn split(expr: &'a SymExpr) -> Self {
        let mut product = Self {
            negative: false,
            coefficient: Integer::from(1),
            numerator: Vec::new(),
            denominator: Vec::new(),
        };
        product.push(expr);

        product.negative = product.coefficient < 0;
        product.coefficient.abs_mut();
        product
    }

    fn push(&mut self, expr: &'a SymExpr) {
        match expr {
            SymExpr::Primary(Primary::Integer(int)) => self.coefficient *= int,
            SymExpr::Mul(factors) => factors.iter().for_each(|factor| self.push(factor)),
            SymExpr::Exp(base, exp) => match exp.as_integer() {
                Some(exp) if *exp < 0 => self.denominator.push((&**base, Integer::from(-exp))),
                _ => self.numerator.push(expr),
            },
            _ => self.numerator.push(expr),
        }
    }

    /// Returns true if the coefficient must be written out.
    pub(crate) fn shows_coefficient(&self) -> bool {
        self.coefficient != 1 || self.numerator.is_empty()
    }
}

/// Writes `base^exp`, wrapping the base and the exponent in parentheses where needed.
fn fmt_power(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> Result {
    let wrap_base = match base {
        SymExpr::Primary(Primary::Integer(int)) => *int < 0,
        SymExpr::Primary(_) => false,
        _ => true,
    };
    if wrap_base {
        write!(f, "({})", base)?;
    } else {
        write!(f, "{}", base)?;
    }

    match exp {
        SymExpr::Primary(Primary::Integer(int)) if *int >= 0 => write!(f, "^{}", int),
        SymExpr::Primary(Primary::Symbol(sym)) => write!(f, "^{}", sym),
        exp => write!(f, "^({})", exp),
    }
}

/// Writes a single factor of a product.
fn fmt_factor(f: &mut Formatter, factor: &SymExpr) -> Result {
    match factor {
        SymExpr::Add(_) | SymExpr::Mul(_) => write!(f, "({})", factor),
        SymExpr::Primary(Primary::Integer(int)) if *int < 0 => write!(f, "({})", int),
        SymExpr::Exp(base, exp) => fmt_power(f, base, exp),
        SymExpr::Primary(primary) => write!(f, "{}", primary),
    }
}

/// Writes a factor of a denominator raised to the given exponent.
fn fmt_denominator_factor(f: &mut Formatter, base: &SymExpr, exp: &Integer) -> Result {
    if *exp == 1 {
        fmt_factor(f, base)
    } else {
        fmt_power(f, base, &SymExpr::Primary(Primary::Integer(exp.clone())))
    }
}

/// Writes a product without its sign.
fn fmt_product(f: &mut Formatter, product: &Product) -> Result {
    let mut first = true;
    if product.shows_coefficient() {
        write!(f, "{}", product.coefficient)?;
        first = false;
    }
    for factor in &product.numerator {
        if !first {
            write!(f, " * ")?;
        }
        fmt_factor(f, factor)?;
        first = false;
    }

    match product.denominator.as_slice() {
        [] => Ok(()),
        [(base, exp)] => {
            write!(f, " / ")?;
            fmt_denominator_factor(f, base, exp)
        },
        factors => {
            write!(f, " / (")?;
            let mut iter = factors.iter();
            if let Some((base, exp)) = iter.next() {
                fmt_denominator_factor(f, base, exp)?;
                for (base, exp) in iter {
                    write!(f, " * ")?;
                    fmt_denominator_factor(f, base, exp)?;
                }
            }
            write!(f, ")")
        },
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Integer(int) => write!(f, "{}", int),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
            Self::Function(function) => write!(f, "{}", function),
        }
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Add(terms) if terms.is_empty() => write!(f, "0"),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    let product = Product::split(term);
                    match (i, product.negative) {
                        (0, true) => write!(f, "-")?,
                        (0, false) => (),
                        (_, true) => write!(f, " - ")?,
                        (_, false) => write!(f, " + ")?,
                    }
                    fmt_product(f, &product)?;
                }
                Ok(())
            },
            term => {
                let product = Product::split(term);
                if product.negative {
                    write!(f, "-")?;
                }
                fmt_product(f, &product)
            },
        }
    }
}
