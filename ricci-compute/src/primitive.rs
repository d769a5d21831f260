//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{ops::Pow, Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string of decimal digits.
///
/// The tokenizer only produces integer literals made of ASCII digits, so the fallback to zero is
/// never taken for source literals.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap_or_default()
}

/// Creates a [`Rational`] with the given numerator and denominator. The denominator must not be
/// zero.
pub fn rational<N, D>(numerator: N, denominator: D) -> Rational
where
    Integer: From<N> + From<D>,
{
    Rational::from((Integer::from(numerator), Integer::from(denominator)))
}

/// Creates an exact [`Rational`] from a decimal literal such as `0.25`.
pub fn rational_from_decimal_str(s: &str) -> Rational {
    match s.split_once('.') {
        Some((whole, fraction)) => {
            let digits = format!("{}{}", whole, fraction);
            let denominator = int(10).pow(fraction.len() as u32);
            Rational::from((int_from_str(&digits), denominator))
        },
        None => Rational::from(int_from_str(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_is_exact() {
        assert_eq!(rational_from_decimal_str("0.5"), rational(1, 2));
        assert_eq!(rational_from_decimal_str("2.25"), rational(9, 4));
        assert_eq!(rational_from_decimal_str("10.0"), rational(10, 1));
    }

    #[test]
    fn integer_literal() {
        assert_eq!(int_from_str("144"), 144);
        assert_eq!(int_from_str("000"), 0);
    }
}
