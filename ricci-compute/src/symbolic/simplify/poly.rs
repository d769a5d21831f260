//! Sparse multivariate polynomials with exact rational coefficients.

use rug::{Integer, Rational};
use std::{cmp::Ordering, collections::BTreeMap, ops::{Add, Neg, Sub}};
use super::atom::{Atom, CanonicalExpr};
use crate::symbolic::expr::SymExpr;

/// A product of atoms raised to positive integer powers. The empty product is `1`.
///
/// Monomials are ordered lexicographically by exponent, with smaller atoms being more
/// significant. This is a monomial order: it is compatible with multiplication, which the
/// division algorithm in [`Poly::div_exact`] relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Monomial(BTreeMap<Atom, u32>);

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.0.iter().peekable();
        let mut rhs = other.0.iter().peekable();
        loop {
            match (lhs.peek(), rhs.peek()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((lhs_atom, lhs_exp)), Some((rhs_atom, rhs_exp))) => {
                    match lhs_atom.cmp(rhs_atom) {
                        // the atom is missing from `other`, so its exponent there is zero
                        Ordering::Less => return Ordering::Greater,
                        Ordering::Greater => return Ordering::Less,
                        Ordering::Equal => match lhs_exp.cmp(rhs_exp) {
                            Ordering::Equal => {
                                lhs.next();
                                rhs.next();
                            },
                            ord => return ord,
                        },
                    }
                },
            }
        }
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Monomial {
    /// The monomial consisting of a single atom.
    pub(crate) fn atom(atom: Atom) -> Self {
        Self(BTreeMap::from([(atom, 1)]))
    }

    /// Returns true if this is the empty product.
    pub(crate) fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the exponent of each atom, in order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Atom, u32)> {
        self.0.iter().map(|(atom, exp)| (atom, *exp))
    }

    /// Multiplies two monomials.
    pub(crate) fn mul(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (atom, exp) in &other.0 {
            *result.0.entry(atom.clone()).or_insert(0) += exp;
        }
        result
    }

    /// Divides two monomials. Returns [`None`] if `other` does not divide `self`.
    pub(crate) fn div(&self, other: &Self) -> Option<Self> {
        let mut result = self.clone();
        for (atom, exp) in &other.0 {
            let current = result.0.get_mut(atom)?;
            match (*current).cmp(exp) {
                Ordering::Less => return None,
                Ordering::Equal => {
                    result.0.remove(atom);
                },
                Ordering::Greater => *current -= exp,
            }
        }
        Some(result)
    }

    /// Divides two monomials, dropping the atoms of `other` with a larger exponent than in `self`.
    pub(crate) fn div_saturating(&self, other: &Self) -> Self {
        self.0
            .iter()
            .filter_map(|(atom, exp)| {
                let remaining = exp.saturating_sub(other.0.get(atom).copied().unwrap_or(0));
                (remaining > 0).then(|| (atom.clone(), remaining))
            })
            .collect::<BTreeMap<_, _>>()
            .into()
    }

    /// Returns the greatest common divisor of two monomials.
    pub(crate) fn gcd(&self, other: &Self) -> Self {
        self.0
            .iter()
            .filter_map(|(atom, exp)| other.0.get(atom).map(|other_exp| (atom.clone(), *exp.min(other_exp))))
            .collect::<BTreeMap<_, _>>()
            .into()
    }

    /// Returns the least common multiple of two monomials.
    pub(crate) fn lcm(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (atom, exp) in &other.0 {
            let current = result.0.entry(atom.clone()).or_insert(0);
            *current = (*current).max(*exp);
        }
        result
    }

    /// If the monomial contains `cos(u)^k` with `k >= 2`, returns the monomial with two powers of
    /// `cos(u)` removed, and the argument `u`.
    fn split_cos_square(&self) -> Option<(Self, CanonicalExpr)> {
        let (atom, exp) = self.0.iter().find(|(atom, exp)| matches!(atom, Atom::Cos(_)) && **exp >= 2)?;
        let Atom::Cos(arg) = atom else {
            return None;
        };

        let mut rest = self.clone();
        if *exp > 2 {
            rest.0.insert(atom.clone(), exp - 2);
        } else {
            rest.0.remove(atom);
        }
        Some((rest, arg.clone()))
    }

    /// Returns each atom raised to its exponent, as separate factors.
    pub(crate) fn factors(&self) -> Vec<SymExpr> {
        self.0
            .iter()
            .map(|(atom, exp)| match exp {
                1 => atom.to_expr(),
                exp => atom.to_expr().pow(SymExpr::int(*exp)),
            })
            .collect()
    }
}

impl From<BTreeMap<Atom, u32>> for Monomial {
    fn from(map: BTreeMap<Atom, u32>) -> Self {
        Self(map)
    }
}

/// A polynomial over [`Atom`]s with exact rational coefficients. No stored coefficient is zero.
///
/// Every product is reduced with the Pythagorean identity: `cos(u)^2` is rewritten to
/// `1 - sin(u)^2`, so no term contains `cos(u)` to a power higher than one. `{sin^2 + cos^2 - 1}`
/// for distinct arguments form a Gröbner basis, so this reduced form is unique and a polynomial
/// is zero modulo the identity if and only if its reduced form has no terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Poly(BTreeMap<Monomial, Rational>);

impl Poly {
    /// The zero polynomial.
    pub(crate) fn zero() -> Self {
        Self::default()
    }

    /// A constant polynomial.
    pub(crate) fn constant(value: Rational) -> Self {
        Self::term(Monomial::default(), value)
    }

    /// A polynomial with a single term.
    pub(crate) fn term(monomial: Monomial, coeff: Rational) -> Self {
        let mut poly = Self::zero();
        poly.add_term_reduced(monomial, coeff);
        poly
    }

    /// Returns true if the polynomial has no terms.
    pub(crate) fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// If the polynomial is constant, returns its value.
    pub(crate) fn as_constant(&self) -> Option<Rational> {
        match self.0.len() {
            0 => Some(Rational::new()),
            1 => self.0.get(&Monomial::default()).cloned(),
            _ => None,
        }
    }

    /// Returns the terms of the polynomial, from the smallest monomial to the largest.
    pub(crate) fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.0.iter()
    }

    /// Returns the term with the largest monomial.
    pub(crate) fn leading(&self) -> Option<(&Monomial, &Rational)> {
        self.0.last_key_value()
    }

    /// Adds a single term, without applying the Pythagorean identity.
    fn add_term(&mut self, monomial: Monomial, coeff: Rational) {
        if coeff == 0 {
            return;
        }

        match self.0.get_mut(&monomial) {
            Some(existing) => {
                *existing += coeff;
                if *existing == 0 {
                    self.0.remove(&monomial);
                }
            },
            None => {
                self.0.insert(monomial, coeff);
            },
        }
    }

    /// Adds a single term, rewriting `cos(u)^2` to `1 - sin(u)^2` first.
    fn add_term_reduced(&mut self, monomial: Monomial, coeff: Rational) {
        match monomial.split_cos_square() {
            Some((rest, arg)) => {
                let sin_square = Monomial::from(BTreeMap::from([(Atom::Sin(arg), 2)]));
                self.add_term_reduced(rest.mul(&sin_square), -coeff.clone());
                self.add_term_reduced(rest, coeff);
            },
            None => self.add_term(monomial, coeff),
        }
    }

    /// Applies the Pythagorean identity to every term.
    pub(crate) fn reduced(self) -> Self {
        let mut result = Self::zero();
        for (monomial, coeff) in self.0 {
            result.add_term_reduced(monomial, coeff);
        }
        result
    }

    /// Multiplies every coefficient by `factor`.
    pub(crate) fn scale(&self, factor: &Rational) -> Self {
        if *factor == 0 {
            return Self::zero();
        }

        Self(self.0
            .iter()
            .map(|(monomial, coeff)| (monomial.clone(), Rational::from(coeff * factor)))
            .collect())
    }

    /// Multiplies every term by a monomial and a coefficient, without applying the Pythagorean
    /// identity.
    fn mul_term(&self, monomial: &Monomial, coeff: &Rational) -> Self {
        Self(self.0
            .iter()
            .map(|(m, c)| (m.mul(monomial), Rational::from(c * coeff)))
            .collect())
    }

    /// Multiplies two polynomials.
    pub(crate) fn mul(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for (lhs_monomial, lhs_coeff) in &self.0 {
            for (rhs_monomial, rhs_coeff) in &other.0 {
                result.add_term_reduced(
                    lhs_monomial.mul(rhs_monomial),
                    Rational::from(lhs_coeff * rhs_coeff),
                );
            }
        }
        result
    }

    /// Raises the polynomial to a non-negative integer power.
    pub(crate) fn pow(&self, exp: u32) -> Self {
        (0..exp).fold(Self::constant(Rational::from(1)), |acc, _| acc.mul(self))
    }

    /// Returns the greatest monomial dividing every term. The zero polynomial has content `1`.
    pub(crate) fn monomial_content(&self) -> Monomial {
        let mut terms = self.0.keys();
        let Some(first) = terms.next() else {
            return Monomial::default();
        };
        terms.fold(first.clone(), |acc, monomial| acc.gcd(monomial))
    }

    /// Divides every term by a monomial that divides all of them.
    pub(crate) fn div_monomial(&self, monomial: &Monomial) -> Self {
        Self(self.0
            .iter()
            .map(|(m, c)| (m.div_saturating(monomial), c.clone()))
            .collect())
    }

    /// Returns the rational content of the polynomial: the gcd of the coefficient numerators
    /// over the lcm of their denominators, signed like the leading coefficient. Dividing by the
    /// content leaves coprime integer coefficients and a positive leading coefficient.
    pub(crate) fn content(&self) -> Rational {
        let mut numerator = Integer::new();
        let mut denominator = Integer::from(1);
        for coeff in self.0.values() {
            numerator = numerator.gcd(coeff.numer());
            denominator = denominator.lcm(coeff.denom());
        }

        let content = Rational::from((numerator, denominator));
        match self.leading() {
            Some((_, lead)) if *lead < 0 => -content,
            _ => content,
        }
    }

    /// Returns the lcm of the denominators of the coefficients.
    pub(crate) fn denominator_lcm(&self) -> Integer {
        self.0
            .values()
            .fold(Integer::from(1), |acc, coeff| acc.lcm(coeff.denom()))
    }

    /// Divides this polynomial by `divisor`. Returns [`None`] if the division is not exact.
    ///
    /// The Pythagorean identity is not applied during division, so the quotient should be
    /// [`reduced`](Self::reduced) afterwards.
    pub(crate) fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (lead_monomial, lead_coeff) = divisor.leading()?;
        let mut remainder = self.clone();
        let mut quotient = Self::zero();

        while let Some((monomial, coeff)) = remainder.leading()
            .map(|(monomial, coeff)| (monomial.clone(), coeff.clone()))
        {
            let quotient_monomial = monomial.div(lead_monomial)?;
            let quotient_coeff = coeff / lead_coeff;
            remainder = remainder - &divisor.mul_term(&quotient_monomial, &quotient_coeff);
            quotient.add_term(quotient_monomial, quotient_coeff);
        }

        Some(quotient)
    }

    /// Converts the polynomial into a sum of products.
    pub(crate) fn to_expr(&self) -> SymExpr {
        let terms = self.0
            .iter()
            .map(|(monomial, coeff)| {
                let mut factors = monomial.factors();
                if *coeff != 1 || factors.is_empty() {
                    factors.insert(0, SymExpr::rational(coeff.clone()));
                }
                factors
                    .into_iter()
                    .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor)
                    .downgrade()
            })
            .collect();
        SymExpr::Add(terms).downgrade()
    }
}

impl Add<&Poly> for Poly {
    type Output = Poly;

    fn add(mut self, rhs: &Poly) -> Poly {
        for (monomial, coeff) in &rhs.0 {
            self.add_term(monomial.clone(), coeff.clone());
        }
        self
    }
}

impl Sub<&Poly> for Poly {
    type Output = Poly;

    fn sub(mut self, rhs: &Poly) -> Poly {
        for (monomial, coeff) in &rhs.0 {
            self.add_term(monomial.clone(), -coeff.clone());
        }
        self
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Self(self.0.into_iter().map(|(monomial, coeff)| (monomial, -coeff)).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::primitive::rational;

    fn atom(name: &str) -> Poly {
        Poly::term(Monomial::atom(Atom::Symbol(name.to_string())), Rational::from(1))
    }

    fn trig(sin: bool) -> Poly {
        let arg = CanonicalExpr::new(SymExpr::symbol("theta"));
        let atom = if sin { Atom::Sin(arg) } else { Atom::Cos(arg) };
        Poly::term(Monomial::atom(atom), Rational::from(1))
    }

    fn one() -> Poly {
        Poly::constant(Rational::from(1))
    }

    #[test]
    fn monomial_order_is_multiplicative() {
        let a = Monomial::atom(Atom::Symbol("a".to_string()));
        let b = Monomial::atom(Atom::Symbol("b".to_string()));
        assert!(a > b);
        assert!(a.mul(&a) > a.mul(&b));
        assert!(a.mul(&b) > b.mul(&b));
        assert!(b > Monomial::default());
    }

    #[test]
    fn difference_of_squares() {
        // (a + b)(a - b) = a^2 - b^2
        let product = (atom("a") + &atom("b")).mul(&(atom("a") - &atom("b")));
        let expected = atom("a").mul(&atom("a")) - &atom("b").mul(&atom("b"));
        assert_eq!(product, expected);
    }

    #[test]
    fn pythagorean_identity() {
        let sum = trig(true).pow(2) + &trig(false).pow(2) - &one();
        assert!(sum.is_zero());
    }

    #[test]
    fn cosine_powers_are_reduced() {
        // cos^3 = cos - sin^2 cos
        let cube = trig(false).pow(3);
        let expected = trig(false) - &trig(true).pow(2).mul(&trig(false));
        assert_eq!(cube, expected);
    }

    #[test]
    fn exact_division() {
        // (a^2 - b^2) / (a + b) = a - b
        let dividend = atom("a").pow(2) - &atom("b").pow(2);
        let quotient = dividend.div_exact(&(atom("a") + &atom("b"))).unwrap();
        assert_eq!(quotient, atom("a") - &atom("b"));
    }

    #[test]
    fn inexact_division() {
        let dividend = atom("a").pow(2) + &atom("b").pow(2);
        assert_eq!(dividend.div_exact(&(atom("a") + &atom("b"))), None);
    }

    #[test]
    fn content_and_sign() {
        // -1/2 a + 3/4 b: leading term is the `a` term
        let poly = atom("a").scale(&rational(-1, 2)) + &atom("b").scale(&rational(3, 4));
        assert_eq!(poly.content(), rational(-1, 4));
        assert_eq!(poly.monomial_content(), Monomial::default());
    }
}
