use crate::{ansatz::Ansatz, coordinate::Coordinate, error::TensorError};
use ricci_compute::symbolic::{derivative, SymExpr};

/// Differentiates `expr` with respect to a coordinate.
///
/// If the ansatz declares the coordinate [`Ignorable`](crate::ansatz::Dependence::Ignorable),
/// the result is zero regardless of what `expr` contains. Otherwise, the derivative is computed
/// with respect to the coordinate's variable.
pub fn partial(expr: &SymExpr, coordinate: Coordinate, ansatz: &Ansatz) -> Result<SymExpr, TensorError> {
    if !ansatz.is_free(coordinate) || expr.is_literal_zero() {
        return Ok(SymExpr::zero());
    }
    Ok(derivative(expr, coordinate.symbol())?)
}

#[cfg(test)]
mod tests {
    use ricci_compute::symbolic::{equals, is_zero};
    use super::*;
    use crate::{ansatz::STATIC_SPHERICAL, model::Model};

    fn expressions(model: &Model) -> Vec<SymExpr> {
        let r = model.coordinate(Coordinate::R);
        let theta = model.coordinate(Coordinate::Theta);
        vec![
            model.a.value().clone() * model.b.prime().clone(),
            r.clone() * model.sin_theta_squared() / model.a.value().clone(),
            model.b.second().clone() / (SymExpr::int(2) * model.a.value().clone()),
            theta.clone().cot() + r.clone().pow(SymExpr::int(3)),
            -theta.clone().sin() * theta.cos(),
            // mentions the ignorable coordinates explicitly
            model.coordinate(Coordinate::T) * model.coordinate(Coordinate::Phi) * r,
        ]
    }

    #[test]
    fn ignorable_coordinates() {
        let model = Model::static_spherical();
        for expr in expressions(&model) {
            for coordinate in [Coordinate::T, Coordinate::Phi] {
                let result = partial(&expr, coordinate, &STATIC_SPHERICAL).unwrap();
                assert!(result.is_literal_zero(), "∂_{coordinate} ({expr}) = {result}");
            }
        }
    }

    #[test]
    fn free_coordinates() {
        let model = Model::static_spherical();
        let r = model.coordinate(Coordinate::R);

        let d_r = partial(&(r.clone() / model.a.value().clone()), Coordinate::R, &STATIC_SPHERICAL).unwrap();
        let expected = SymExpr::one() / model.a.value().clone()
            - r * model.a.prime().clone() / model.a.value().clone().pow(SymExpr::int(2));
        assert!(equals(&d_r, &expected).unwrap());

        let d_theta = partial(&model.sin_theta_squared(), Coordinate::Theta, &STATIC_SPHERICAL).unwrap();
        let theta = model.coordinate(Coordinate::Theta);
        let expected = SymExpr::int(2) * theta.clone().sin() * theta.cos();
        assert!(equals(&d_theta, &expected).unwrap());
    }

    #[test]
    fn functions_of_r_are_constant_in_theta() {
        let model = Model::static_spherical();
        let d_theta = partial(model.b.prime(), Coordinate::Theta, &STATIC_SPHERICAL).unwrap();
        assert!(is_zero(&d_theta).unwrap());
    }
}
