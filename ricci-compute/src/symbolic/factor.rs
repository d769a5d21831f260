//! Factorization of the canonical form.

use rug::Rational;
use super::{
    expr::SymExpr,
    simplify::{fraction, SimplifyError},
};

/// Simplifies the expression, then writes it as a product: the rational content of the
/// numerator, the greatest monomial dividing every numerator term, the remaining primitive
/// numerator, and the reciprocal of every denominator factor.
///
/// ```
/// use ricci_compute::symbolic::{factor, SymExpr};
///
/// let r = SymExpr::symbol("r");
///
/// // 2r^2 + 6r = 2 * r * (r + 3)
/// let expr = SymExpr::int(2) * r.clone().pow(SymExpr::int(2)) + SymExpr::int(6) * r.clone();
/// assert_eq!(factor(&expr).unwrap(), SymExpr::Mul(vec![
///     SymExpr::int(2),
///     r.clone(),
///     SymExpr::Add(vec![r, SymExpr::int(3)]),
/// ]));
/// ```
pub fn factor(expr: &SymExpr) -> Result<SymExpr, SimplifyError> {
    let fraction = fraction(expr)?;
    let numerator = fraction.numerator();
    if numerator.is_zero() {
        return Ok(SymExpr::zero());
    }

    let content = numerator.content();
    let monomial = numerator.monomial_content();
    let primitive = numerator
        .div_monomial(&monomial)
        .scale(&Rational::from(content.recip_ref()));

    let mut factors = Vec::new();
    if content != 1 {
        factors.push(SymExpr::rational(content));
    }
    factors.extend(monomial.factors());
    if primitive.as_constant().is_none() {
        factors.push(primitive.to_expr());
    }
    factors.extend(fraction.denominator_factors().into_iter().map(SymExpr::recip));

    Ok(factors
        .into_iter()
        .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor)
        .downgrade())
}
