//! Closed forms of the diagonal Ricci components, written out by hand.
//!
//! These are independent of the Christoffel table; they exist only to be compared against what
//! [`Ricci`](crate::ricci::Ricci) computes.

use crate::{coordinate::Coordinate, model::Model};
use ricci_compute::symbolic::SymExpr;

/// `R_tt = B''/(2A) - (B'/(4A)) (B'/B + A'/A) + B'/(A r)`
pub fn ricci_tt(model: &Model) -> SymExpr {
    let r = model.coordinate(Coordinate::R);
    let (a, a1) = (model.a.value().clone(), model.a.prime().clone());
    let (b, b1, b2) = (model.b.value().clone(), model.b.prime().clone(), model.b.second().clone());

    b2 / (SymExpr::int(2) * a.clone())
        - b1.clone() / (SymExpr::int(4) * a.clone()) * (b1.clone() / b + a1 / a.clone())
        + b1 / (a * r)
}

/// `R_rr = -B''/(2B) + (B'/(4B)) (B'/B + A'/A) + A'/(A r)`
pub fn ricci_rr(model: &Model) -> SymExpr {
    let r = model.coordinate(Coordinate::R);
    let (a, a1) = (model.a.value().clone(), model.a.prime().clone());
    let (b, b1, b2) = (model.b.value().clone(), model.b.prime().clone(), model.b.second().clone());

    -b2 / (SymExpr::int(2) * b.clone())
        + b1.clone() / (SymExpr::int(4) * b.clone()) * (b1 / b + a1.clone() / a.clone())
        + a1 / (a * r)
}

/// `R_θθ = 1 - 1/A + (r/(2A)) (A'/A - B'/B)`
pub fn ricci_theta_theta(model: &Model) -> SymExpr {
    let r = model.coordinate(Coordinate::R);
    let (a, a1) = (model.a.value().clone(), model.a.prime().clone());
    let (b, b1) = (model.b.value().clone(), model.b.prime().clone());

    SymExpr::one() - SymExpr::one() / a.clone()
        + r / (SymExpr::int(2) * a.clone()) * (a1 / a - b1 / b)
}

/// `R_φφ = sin²θ R_θθ`
pub fn ricci_phi_phi(model: &Model) -> SymExpr {
    model.sin_theta_squared() * ricci_theta_theta(model)
}

/// Returns the closed form of the diagonal component `R_{cc}`.
pub fn diagonal(model: &Model, coordinate: Coordinate) -> SymExpr {
    match coordinate {
        Coordinate::T => ricci_tt(model),
        Coordinate::R => ricci_rr(model),
        Coordinate::Theta => ricci_theta_theta(model),
        Coordinate::Phi => ricci_phi_phi(model),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rendering() {
        let model = Model::static_spherical();
        assert_eq!(
            ricci_theta_theta(&model).to_string(),
            "1 - 1 / A(r) + r * (A'(r) / A(r) - B'(r) / B(r)) / (2 * A(r))",
        );
    }
}
