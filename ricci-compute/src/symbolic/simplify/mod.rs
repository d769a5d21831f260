//! Simplification of expressions into a canonical rational form.
//!
//! [`simplify`] converts an expression into a [`Fraction`]: an expanded polynomial numerator with
//! exact rational coefficients, over a denominator that is a monomial times powers of primitive
//! polynomials. The indeterminates of those polynomials are [`Atom`]s: variables, undetermined
//! functions, `sin u` and `cos u` for canonical arguments `u`, and opaque expressions the form
//! cannot see through (non-integer powers, unknown calls).
//!
//! The following rewrites are applied on the way:
//!
//! - `tan`, `cot`, `sec` and `csc` are expressed through `sin` and `cos`.
//! - `sin(-u) = -sin(u)`, `cos(-u) = cos(u)`, `sin(0) = 0` and `cos(0) = 1`.
//! - `cos(u)^2` becomes `1 - sin(u)^2` in every numerator term.
//! - Monomials and exactly dividing polynomial factors cancel between numerator and denominator.
//!
//! An expression is identically zero if and only if the numerator of its canonical form has no
//! terms, which is what [`is_zero`] and [`equals`] check.

mod atom;
mod fraction;
mod poly;

pub(crate) use fraction::Fraction;

use atom::{Atom, CanonicalExpr};
use crate::{
    primitive::rational,
    symbolic::expr::{Primary, SymExpr},
};

/// An error that can occur while simplifying an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplifyError {
    /// The expression divides by a subexpression that simplifies to zero.
    DivisionByZero,
}

impl std::fmt::Display for SimplifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by an expression that simplifies to zero"),
        }
    }
}

impl std::error::Error for SimplifyError {}

/// Converts the argument of a trigonometric function into canonical form. Returns [`None`] if the
/// argument is zero; otherwise, returns the argument with a positive leading coefficient, and
/// whether it had to be negated to get there.
fn canonical_argument(arg: &SymExpr) -> Result<Option<(CanonicalExpr, bool)>, SimplifyError> {
    let arg = fraction(arg)?;
    if arg.is_zero() {
        return Ok(None);
    }

    let negated = arg.is_negative();
    let arg = if negated { arg.neg() } else { arg };
    Ok(Some((CanonicalExpr::new(arg.to_expr()), negated)))
}

/// Converts a trigonometric function of the given argument.
fn trig(name: &str, arg: &SymExpr) -> Result<Fraction, SimplifyError> {
    let Some((arg, negated)) = canonical_argument(arg)? else {
        return match name {
            "sin" | "tan" => Ok(Fraction::zero()),
            "cos" | "sec" => Ok(Fraction::constant(rational(1, 1))),
            _ => Err(SimplifyError::DivisionByZero),
        };
    };

    let sin = Fraction::atom(Atom::Sin(arg.clone()));
    let sin = if negated { sin.neg() } else { sin };
    let cos = Fraction::atom(Atom::Cos(arg));

    match name {
        "sin" => Ok(sin),
        "cos" => Ok(cos),
        "tan" => Ok(sin.mul(&cos.inverse()?)),
        "cot" => Ok(cos.mul(&sin.inverse()?)),
        "sec" => cos.inverse(),
        _ => sin.inverse(),
    }
}

/// Wraps an expression the canonical form cannot see through in an opaque atom. Its
/// subexpressions are simplified first, so equal opaque expressions share an atom.
fn opaque(expr: SymExpr) -> Fraction {
    Fraction::atom(Atom::Opaque(CanonicalExpr::new(expr)))
}

/// Converts `base^exp` into canonical form. Integer powers are expanded; any other power is
/// opaque.
fn power(base: &SymExpr, exp: &SymExpr) -> Result<Fraction, SimplifyError> {
    let exp = fraction(exp)?;
    if let Some(exp) = exp.as_constant() {
        if exp.denom() == &1 {
            if let Some(exp) = exp.numer().to_i64() {
                return fraction(base)?.pow(exp);
            }
        }
    }

    let base = fraction(base)?;
    if base.is_zero() && exp.is_negative() {
        return Err(SimplifyError::DivisionByZero);
    }
    Ok(opaque(base.to_expr().pow(exp.to_expr())))
}

/// Converts an expression into a [`Fraction`] in canonical form.
pub(crate) fn fraction(expr: &SymExpr) -> Result<Fraction, SimplifyError> {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => Ok(Fraction::constant(n.clone().into())),
        SymExpr::Primary(Primary::Symbol(name)) => Ok(Fraction::atom(Atom::Symbol(name.clone()))),
        SymExpr::Primary(Primary::Function(function)) => Ok(Fraction::atom(Atom::Function(function.clone()))),
        SymExpr::Primary(Primary::Call(name, args)) => match (name.as_str(), args.as_slice()) {
            ("sin" | "cos" | "tan" | "cot" | "sec" | "csc", [arg]) => trig(name, arg),
            ("sqrt", [arg]) => power(arg, &SymExpr::rational(rational(1, 2))),
            _ => {
                let args = args.iter().map(simplify).collect::<Result<Vec<_>, _>>()?;
                Ok(opaque(SymExpr::call(name.clone(), args)))
            },
        },
        SymExpr::Add(terms) => terms
            .iter()
            .try_fold(Fraction::zero(), |acc, term| Ok(acc.add(&fraction(term)?))),
        SymExpr::Mul(factors) => factors
            .iter()
            .try_fold(Fraction::constant(rational(1, 1)), |acc, factor| Ok(acc.mul(&fraction(factor)?))),
        SymExpr::Exp(base, exp) => power(base, exp),
    }
}

/// Simplifies an expression into canonical form: a single fraction whose numerator is an
/// expanded sum of products, with every common factor cancelled.
///
/// Simplifying an already simplified expression produces the same expression.
pub fn simplify(expr: &SymExpr) -> Result<SymExpr, SimplifyError> {
    Ok(fraction(expr)?.to_expr())
}

/// Returns true if the expression simplifies to zero.
pub fn is_zero(expr: &SymExpr) -> Result<bool, SimplifyError> {
    Ok(fraction(expr)?.is_zero())
}

/// Returns true if the two expressions are mathematically equal, that is, if their difference
/// simplifies to zero.
pub fn equals(lhs: &SymExpr, rhs: &SymExpr) -> Result<bool, SimplifyError> {
    is_zero(&(lhs.clone() - rhs.clone()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ricci_parser::parser::{ast::Expr as AstExpr, Parser};
    use super::*;

    fn parse(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    fn assert_equal(lhs: &str, rhs: &str) {
        assert!(equals(&parse(lhs), &parse(rhs)).unwrap(), "expected `{lhs}` = `{rhs}`");
    }

    fn assert_not_equal(lhs: &str, rhs: &str) {
        assert!(!equals(&parse(lhs), &parse(rhs)).unwrap(), "expected `{lhs}` != `{rhs}`");
    }

    #[test]
    fn like_terms() {
        assert_equal("r + r + r", "3r");
        assert_equal("2(r + (M - 5))", "2r + 2M - 10");
        assert_equal("(r + M)^2", "r^2 + 2r M + M^2");
    }

    #[test]
    fn fractions() {
        assert_equal("1/r + 1/M", "(r + M) / (r M)");
        assert_equal("1 - 2M/r", "(r - 2M) / r");
        assert_equal("(r^2 - 4M^2) / (r - 2M)", "r + 2M");
        assert_equal("0.5 A(r)", "A(r) / 2");
        assert_not_equal("1/r", "r");
    }

    #[test]
    fn pythagorean_identity() {
        assert_equal("sin(theta)^2 + cos(theta)^2", "1");
        assert_equal("cos(theta)^4", "1 - 2sin(theta)^2 + sin(theta)^4");
        assert_equal("1 / cos(theta)^2 - tan(theta)^2", "1");
        assert_not_equal("sin(theta)^2 + cos(phi)^2", "1");
    }

    #[test]
    fn reciprocal_trigonometry() {
        assert_equal("cot(theta)", "cos(theta) / sin(theta)");
        assert_equal("sec(theta) cos(theta)", "1");
        assert_equal("csc(theta) sin(theta)", "1");
        assert_equal("cot(theta) sin(theta)^2", "sin(theta) cos(theta)");
    }

    #[test]
    fn argument_normalization() {
        assert_equal("sin(-theta)", "-sin(theta)");
        assert_equal("cos(-theta)", "cos(theta)");
        assert_equal("sin(M - r) + sin(r - M)", "0");
        assert_equal("sin(2(theta + 1) - 2)", "sin(2theta)");
        assert_equal("sin(0) + cos(0)", "1");
    }

    #[test]
    fn opaque_powers() {
        assert_equal("sqrt(r)", "r^0.5");
        assert_equal("sqrt(r) sqrt(r)", "r^(1/2) r^(2/4)");
        assert_not_equal("sqrt(r)^2", "r");
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(simplify(&parse("1 / (r - r)")), Err(SimplifyError::DivisionByZero));
        assert_eq!(simplify(&parse("1 / (sin(theta)^2 + cos(theta)^2 - 1)")), Err(SimplifyError::DivisionByZero));
        assert_eq!(simplify(&parse("cot(0)")), Err(SimplifyError::DivisionByZero));
    }

    #[test]
    fn simplified_form() {
        assert_eq!(simplify(&parse("r + r")).unwrap(), parse("2r"));
        assert_eq!(simplify(&parse("(r - 2M) / r + 2M / r")).unwrap(), SymExpr::one());
        assert_eq!(
            simplify(&parse("r / (2r^2)")).unwrap(),
            SymExpr::Mul(vec![SymExpr::int(2).recip(), SymExpr::symbol("r").recip()]),
        );
    }

    #[test]
    fn idempotence() {
        let inputs = [
            "B''(r) / (2A(r)) - B'(r) / (4A(r)) (B'(r) / B(r) + A'(r) / A(r))",
            "1 - 1/A(r) + r / (2A(r)) (A'(r) / A(r) - B'(r) / B(r))",
            "sin(theta) cos(theta) cot(theta) - cos(theta)^2",
            "(1 - 2M/r)^-1",
        ];

        for input in inputs {
            let once = simplify(&parse(input)).unwrap();
            let twice = simplify(&once).unwrap();
            assert_eq!(once, twice, "simplifying `{input}` twice changed the result");
            assert!(equals(&once, &parse(input)).unwrap());
        }
    }
}
