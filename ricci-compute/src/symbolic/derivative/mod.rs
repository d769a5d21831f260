//! Symbolic differentiation with respect to a named variable.

mod function;

use super::expr::{Primary, SymExpr};

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to keep
/// derivatives small and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Integer(i)) => *i == 0,
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exponent) => is_trivially_zero(base) && !is_trivially_zero(exponent),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to keep
/// derivatives small and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Integer(i)) => *i == 1,
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        SymExpr::Add(exprs) => exprs.len() == 1 && is_trivially_unity(&exprs[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if let SymExpr::Mul(factors) = e {
            factors.into_iter().for_each(|factor| self.mult(factor));
            return;
        }

        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::zero()];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // factors that do not mention the variable contribute nothing when differentiated
        if !product[derivative_index].depends_on(with) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// `(f^n)' = n * f^(n - 1) * f'`, for an exponent `n` that does not depend on the variable.
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if exp.depends_on(with) {
        return Err(SymbolicDerivativeError::Unsupported);
    }

    let lowered = match exp.as_integer() {
        Some(n) => SymExpr::Primary(Primary::Integer(n.clone() - 1)),
        None => exp.clone() + SymExpr::int(-1),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(exp.clone());
    mult_group.mult(base.clone().pow(lowered));
    mult_group.mult(derivative(base, with)?);
    Ok(mult_group.into())
}

/// An error that can occur while computing a derivative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicDerivativeError {
    /// The function may be differentiable, but computing its derivative symbolically is not
    /// supported (for example, a power whose exponent depends on the variable).
    Unsupported,

    /// The provided sub-expression is not differentiable.
    Undifferentiable(SymExpr),
}

impl std::fmt::Display for SymbolicDerivativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "the derivative cannot be computed symbolically"),
            Self::Undifferentiable(expr) => write!(f, "`{}` is not differentiable", expr),
        }
    }
}

impl std::error::Error for SymbolicDerivativeError {}

/// Computes the derivative of the given expression with respect to the variable `with`.
///
/// Undetermined functions of `with` gain one derivative order (`A(r)` becomes `A'(r)`); any
/// symbol or function of a different variable is treated as a constant. Returns [`Err`] if the
/// derivative could not be symbolically computed.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if is_trivially_zero(f) {
        return Ok(SymExpr::zero());
    }

    let expr = match f {
        SymExpr::Primary(Primary::Integer(_)) => Ok(SymExpr::zero()),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Ok(SymExpr::one())
            } else {
                Ok(SymExpr::zero())
            }
        },
        SymExpr::Primary(Primary::Function(function)) => {
            if function.var == with {
                function.derivative()
                    .map(SymExpr::function)
                    .ok_or(SymbolicDerivativeError::Unsupported)
            } else {
                Ok(SymExpr::zero())
            }
        },
        SymExpr::Primary(Primary::Call(func, args)) => {
            function::function_derivative(func, args, with)
        },
        SymExpr::Add(exprs) => sum_rule(exprs, with),
        SymExpr::Mul(exprs) => product_rule(exprs, with),
        SymExpr::Exp(base, exp) => power_rule(base, exp, with),
    }?;

    if is_trivially_zero(&expr) {
        Ok(SymExpr::zero())
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use ricci_parser::parser::{ast::Expr as AstExpr, Parser};
    use std::collections::HashMap;
    use super::*;
    use crate::symbolic::{equals, expr::Function};

    /// Numerically evaluates an expression. Only the features exercised by these tests are
    /// supported.
    pub(crate) fn eval(expr: &SymExpr, vars: &HashMap<&str, f64>) -> f64 {
        match expr {
            SymExpr::Primary(Primary::Integer(n)) => n.to_f64(),
            SymExpr::Primary(Primary::Symbol(sym)) => vars[sym.as_str()],
            SymExpr::Primary(Primary::Call(name, args)) => {
                let x = eval(&args[0], vars);
                match name.as_str() {
                    "sin" => x.sin(),
                    "cos" => x.cos(),
                    "tan" => x.tan(),
                    "cot" => x.tan().recip(),
                    "sec" => x.cos().recip(),
                    "csc" => x.sin().recip(),
                    "sqrt" => x.sqrt(),
                    _ => unreachable!("unknown function {name}"),
                }
            },
            SymExpr::Primary(Primary::Function(function)) => {
                unreachable!("cannot evaluate undetermined function {function}")
            },
            SymExpr::Add(terms) => terms.iter().map(|term| eval(term, vars)).sum(),
            SymExpr::Mul(factors) => factors.iter().map(|factor| eval(factor, vars)).product(),
            SymExpr::Exp(base, exp) => eval(base, vars).powf(eval(exp, vars)),
        }
    }

    fn parse(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    /// Compares the symbolic derivative of `function` with respect to `x` against a central
    /// finite difference at random sample points.
    fn test_for_function(function: &'static str) {
        const DX: f64 = 1e-5;
        const TOL: f64 = 1e-4;

        let expr = parse(function);
        let symbolic = derivative(&expr, "x")
            .unwrap_or_else(|err| panic!("derivative of \"{function}\" failed: {err}"));

        let mut rng = rand::thread_rng();
        for _ in 0..8 {
            let x = rng.gen_range(0.3..1.3);
            let at = |x: f64| HashMap::from([("x", x), ("y", 0.7)]);
            let numeric = (eval(&expr, &at(x + DX)) - eval(&expr, &at(x - DX))) / (2.0 * DX);
            assert_float_absolute_eq!(eval(&symbolic, &at(x)), numeric, TOL);
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1");
        test_for_function("3x^-2 y");
    }

    #[test]
    fn product_and_quotient() {
        test_for_function("x sin(x)");
        test_for_function("(x + 1) / (x^2 + y)");
    }

    #[test]
    fn trigonometry() {
        test_for_function("sin(x) cos(x)");
        test_for_function("tan(x / 2)");
        test_for_function("cot(x)^2");
        test_for_function("sec(x) + csc(x)");
    }

    #[test]
    fn chain_rule() {
        test_for_function("sin(x^2 + y)");
        test_for_function("sqrt(1 + x^2)");
        test_for_function("(1 + 2y/x)^-1");
    }

    #[test]
    fn undetermined_function() {
        let a = Function::new("A", "r");
        let expr = SymExpr::function(a.clone());
        let d = derivative(&expr, "r").unwrap();
        assert_eq!(d, SymExpr::function(a.derivative().unwrap()));
        assert_eq!(derivative(&expr, "theta").unwrap(), SymExpr::zero());
    }

    #[test]
    fn quotient_of_functions() {
        // (B'/B)' = B''/B - B'^2/B^2
        let expr = parse("B'(r) / B(r)");
        let expected = parse("B''(r) / B(r) - B'(r)^2 / B(r)^2");
        assert!(equals(&derivative(&expr, "r").unwrap(), &expected).unwrap());
    }

    #[test]
    fn constant_factors_are_skipped() {
        let expr = parse("sin(theta) r^2");
        assert_eq!(derivative(&expr, "r").unwrap(), SymExpr::Mul(vec![
            SymExpr::symbol("theta").sin(),
            SymExpr::int(2),
            SymExpr::symbol("r").pow(SymExpr::int(1)),
        ]));
    }

    #[test]
    fn variable_exponent_is_unsupported() {
        let expr = parse("2^r");
        assert_eq!(derivative(&expr, "r"), Err(SymbolicDerivativeError::Unsupported));
    }
}
