//! Symbolic derivatives of the elementary functions.

use crate::symbolic::expr::SymExpr;

use super::derivative;
use super::MultBuilder;
use super::SymbolicDerivativeError;

/// Computes the derivative of an elementary function and applies the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let [arg] = args else {
        return Err(SymbolicDerivativeError::Undifferentiable(SymExpr::call(func, args.to_vec())));
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(arg, with)?);

    match func {
        // sin' = cos
        "sin" => mult_group.mult(arg.clone().cos()),
        // cos' = -sin
        "cos" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(arg.clone().sin());
        },
        // tan' = cos^-2
        "tan" => mult_group.mult(arg.clone().cos().pow(SymExpr::int(-2))),
        // cot' = -sin^-2
        "cot" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(arg.clone().sin().pow(SymExpr::int(-2)));
        },
        // sec' = sin cos^-2
        "sec" => {
            mult_group.mult(arg.clone().sin());
            mult_group.mult(arg.clone().cos().pow(SymExpr::int(-2)));
        },
        // csc' = -cos sin^-2
        "csc" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(arg.clone().cos());
            mult_group.mult(arg.clone().sin().pow(SymExpr::int(-2)));
        },
        // sqrt' = 1 / (2 sqrt)
        "sqrt" => {
            mult_group.mult(SymExpr::int(2).recip());
            mult_group.mult(arg.clone().sqrt().recip());
        },
        _ => return Err(SymbolicDerivativeError::Unsupported),
    };

    Ok(mult_group.into())
}
