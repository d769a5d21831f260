//! Rational functions: a polynomial over a factored denominator.

use rug::Rational;
use super::{
    atom::Atom,
    poly::{Monomial, Poly},
    SimplifyError,
};
use crate::symbolic::expr::SymExpr;

/// A quotient of polynomials `numerator / (monomial * factor_1^e_1 * ... * factor_n^e_n)`.
///
/// The denominator is kept factored so that sums can use the least common multiple of the
/// denominators. Each polynomial factor is primitive (coprime integer coefficients, positive
/// leading coefficient) and has no monomial content; all signs and rational coefficients live in
/// the numerator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fraction {
    numerator: Poly,
    den_monomial: Monomial,
    den_factors: Vec<(Poly, u32)>,
}

impl Fraction {
    /// Creates a fraction with denominator `1`.
    pub(crate) fn from_poly(numerator: Poly) -> Self {
        Self {
            numerator,
            den_monomial: Monomial::default(),
            den_factors: Vec::new(),
        }
    }

    /// The fraction `0`.
    pub(crate) fn zero() -> Self {
        Self::from_poly(Poly::zero())
    }

    /// A constant fraction.
    pub(crate) fn constant(value: Rational) -> Self {
        Self::from_poly(Poly::constant(value))
    }

    /// The fraction consisting of a single atom.
    pub(crate) fn atom(atom: Atom) -> Self {
        Self::from_poly(Poly::term(Monomial::atom(atom), Rational::from(1)))
    }

    /// Returns true if the fraction is zero.
    pub(crate) fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// If the fraction is constant, returns its value.
    pub(crate) fn as_constant(&self) -> Option<Rational> {
        if self.den_monomial.is_one() && self.den_factors.is_empty() {
            self.numerator.as_constant()
        } else {
            None
        }
    }

    /// Returns the numerator.
    pub(crate) fn numerator(&self) -> &Poly {
        &self.numerator
    }

    /// Returns the factors of the denominator, each raised to its multiplicity.
    pub(crate) fn denominator_factors(&self) -> Vec<SymExpr> {
        let mut factors = self.den_monomial.factors();
        factors.extend(self.den_factors.iter().map(|(factor, exp)| match exp {
            1 => factor.to_expr(),
            exp => factor.to_expr().pow(SymExpr::int(*exp)),
        }));
        factors
    }

    /// Returns true if the leading coefficient of the numerator is negative.
    pub(crate) fn is_negative(&self) -> bool {
        self.numerator.leading().is_some_and(|(_, coeff)| *coeff < 0)
    }

    /// Expands the denominator into a single polynomial.
    fn denominator(&self) -> Poly {
        self.den_factors.iter().fold(
            Poly::term(self.den_monomial.clone(), Rational::from(1)),
            |acc, (factor, exp)| acc.mul(&factor.pow(*exp)),
        )
    }

    /// Returns the multiplicity of a polynomial factor in the denominator.
    fn multiplicity(&self, factor: &Poly) -> u32 {
        self.den_factors
            .iter()
            .find(|(f, _)| f == factor)
            .map_or(0, |(_, exp)| *exp)
    }

    /// Returns the polynomial the numerator must be multiplied by to bring this fraction over the
    /// given common denominator.
    fn cofactor(&self, den_monomial: &Monomial, den_factors: &[(Poly, u32)]) -> Poly {
        den_factors.iter().fold(
            Poly::term(den_monomial.div_saturating(&self.den_monomial), Rational::from(1)),
            |acc, (factor, exp)| acc.mul(&factor.pow(exp - self.multiplicity(factor))),
        )
    }

    /// Adds two fractions over the least common multiple of their denominators.
    pub(crate) fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let den_monomial = self.den_monomial.lcm(&other.den_monomial);
        let mut den_factors = self.den_factors.clone();
        for (factor, exp) in &other.den_factors {
            match den_factors.iter_mut().find(|(f, _)| f == factor) {
                Some((_, existing)) => *existing = (*existing).max(*exp),
                None => den_factors.push((factor.clone(), *exp)),
            }
        }

        let lhs = self.numerator.mul(&self.cofactor(&den_monomial, &den_factors));
        let rhs = other.numerator.mul(&other.cofactor(&den_monomial, &den_factors));
        Self {
            numerator: lhs + &rhs,
            den_monomial,
            den_factors,
        }.normalize()
    }

    /// Negates the fraction.
    pub(crate) fn neg(&self) -> Self {
        Self {
            numerator: -self.numerator.clone(),
            ..self.clone()
        }
    }

    /// Multiplies two fractions.
    pub(crate) fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut den_factors = self.den_factors.clone();
        for (factor, exp) in &other.den_factors {
            match den_factors.iter_mut().find(|(f, _)| f == factor) {
                Some((_, existing)) => *existing += exp,
                None => den_factors.push((factor.clone(), *exp)),
            }
        }

        Self {
            numerator: self.numerator.mul(&other.numerator),
            den_monomial: self.den_monomial.mul(&other.den_monomial),
            den_factors,
        }.normalize()
    }

    /// Returns `1 / self`.
    pub(crate) fn inverse(&self) -> Result<Self, SimplifyError> {
        if self.is_zero() {
            return Err(SimplifyError::DivisionByZero);
        }

        let content = self.numerator.content();
        let monomial = self.numerator.monomial_content();
        let primitive = self.numerator
            .div_monomial(&monomial)
            .scale(&Rational::from(content.recip_ref()));

        let den_factors = match primitive.as_constant() {
            Some(_) => Vec::new(),
            None => vec![(primitive, 1)],
        };

        Ok(Self {
            numerator: self.denominator().scale(&Rational::from(content.recip_ref())),
            den_monomial: monomial,
            den_factors,
        }.normalize())
    }

    /// Raises the fraction to an integer power.
    pub(crate) fn pow(&self, exp: i64) -> Result<Self, SimplifyError> {
        let base = if exp < 0 { self.inverse()? } else { self.clone() };
        let mut result = Self::constant(Rational::from(1));
        for _ in 0..exp.unsigned_abs() {
            result = result.mul(&base);
        }
        Ok(result)
    }

    /// Cancels the monomial content shared by the numerator and denominator.
    fn cancel_monomial(&mut self) {
        let common = self.numerator.monomial_content().gcd(&self.den_monomial);
        if !common.is_one() {
            self.numerator = self.numerator.div_monomial(&common);
            self.den_monomial = self.den_monomial.div_saturating(&common);
        }
    }

    /// Cancels common factors between the numerator and denominator.
    fn normalize(mut self) -> Self {
        if self.numerator.is_zero() {
            return Self::zero();
        }

        self.cancel_monomial();
        for (factor, exp) in &mut self.den_factors {
            while *exp > 0 {
                match self.numerator.div_exact(factor) {
                    Some(quotient) => {
                        self.numerator = quotient.reduced();
                        *exp -= 1;
                    },
                    None => break,
                }
            }
        }
        self.den_factors.retain(|(_, exp)| *exp > 0);
        self.cancel_monomial();
        self
    }

    /// Converts the fraction into an expression: an expanded numerator with integer
    /// coefficients, times the inverse of each denominator factor.
    pub(crate) fn to_expr(&self) -> SymExpr {
        let scale = self.numerator.denominator_lcm();
        let numerator = self.numerator.scale(&Rational::from(scale.clone())).to_expr();

        let mut denominator = Vec::new();
        if scale != 1 {
            denominator.push(SymExpr::Primary(crate::symbolic::expr::Primary::Integer(scale)));
        }
        denominator.extend(self.denominator_factors());

        if denominator.is_empty() {
            return numerator;
        }

        let numerator = if numerator.is_literal_one() {
            SymExpr::Mul(Vec::new())
        } else {
            numerator
        };
        denominator
            .into_iter()
            .fold(numerator, |acc, factor| acc * factor.recip())
            .downgrade()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::primitive::rational;

    fn symbol(name: &str) -> Fraction {
        Fraction::atom(Atom::Symbol(name.to_string()))
    }

    #[test]
    fn common_denominator() {
        // 1/r + 1/M = (r + M) / (r M)
        let sum = symbol("r").inverse().unwrap().add(&symbol("M").inverse().unwrap());
        let expected = symbol("r").add(&symbol("M")).mul(&symbol("r").mul(&symbol("M")).inverse().unwrap());
        assert_eq!(sum, expected);
    }

    #[test]
    fn polynomial_factor_cancels() {
        // (r^2 - M^2) / (r - M) = r + M
        let numerator = symbol("r").pow(2).unwrap().add(&symbol("M").pow(2).unwrap().neg());
        let denominator = symbol("r").add(&symbol("M").neg());
        let quotient = numerator.mul(&denominator.inverse().unwrap());
        assert_eq!(quotient, symbol("r").add(&symbol("M")));
    }

    #[test]
    fn sign_lives_in_the_numerator() {
        // 1 / (M - r) = -1 / (r - M)
        let lhs = symbol("M").add(&symbol("r").neg()).inverse().unwrap();
        let rhs = symbol("r").add(&symbol("M").neg()).inverse().unwrap().neg();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn inverse_of_zero() {
        assert_eq!(Fraction::zero().inverse(), Err(SimplifyError::DivisionByZero));
        assert_eq!(symbol("r").add(&symbol("r").neg()).pow(-2), Err(SimplifyError::DivisionByZero));
    }

    #[test]
    fn rational_constants() {
        let half = Fraction::constant(rational(1, 2));
        assert_eq!(half.add(&half).as_constant(), Some(rational(1, 1)));
        assert_eq!(half.pow(-3).unwrap().as_constant(), Some(rational(8, 1)));
    }
}
