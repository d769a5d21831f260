//! Substitution of concrete metric functions, and the Schwarzschild vacuum check.

use crate::{coordinate::Coordinate, error::TensorError, model::Model, ricci::RicciTensor};
use ricci_compute::symbolic::{simplify, subs_function, SymExpr};
use tracing::info;

/// Concrete functions of `r` to use in place of the unknown metric functions.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSubstitution {
    /// The expression replacing `A(r)`.
    pub a: SymExpr,

    /// The expression replacing `B(r)`.
    pub b: SymExpr,
}

impl MetricSubstitution {
    /// Replaces `A`, `B` and their derivatives in `expr`, then simplifies the result.
    pub fn apply(&self, model: &Model, expr: &SymExpr) -> Result<SymExpr, TensorError> {
        let expr = subs_function(expr, model.a.name(), &self.a)?;
        let expr = subs_function(&expr, model.b.name(), &self.b)?;
        Ok(simplify(&expr)?)
    }
}

/// The Schwarzschild solution with the given mass: `B = 1 - 2M/r` and `A = 1/B`.
pub fn schwarzschild(mass: SymExpr) -> MetricSubstitution {
    let r = SymExpr::symbol(Coordinate::R.symbol());
    let b = SymExpr::one() - SymExpr::int(2) * mass / r;
    MetricSubstitution {
        a: SymExpr::one() / b.clone(),
        b,
    }
}

/// The result of substituting concrete metric functions into every Ricci component.
#[derive(Debug, Clone, PartialEq)]
pub struct VacuumReport {
    /// Each component after substitution and simplification, in index order.
    pub components: Vec<((Coordinate, Coordinate), SymExpr)>,
}

impl VacuumReport {
    /// Returns true if every component simplifies to zero.
    pub fn is_vacuum(&self) -> bool {
        self.components.iter().all(|(_, component)| component.is_literal_zero())
    }

    /// Returns the substituted diagonal component `R_{cc}`.
    pub fn diagonal(&self, coordinate: Coordinate) -> &SymExpr {
        &self.components[coordinate.index() * 5].1
    }
}

/// Substitutes concrete metric functions into every component of the Ricci tensor.
pub fn check_vacuum(
    model: &Model,
    tensor: &RicciTensor,
    substitution: &MetricSubstitution,
) -> Result<VacuumReport, TensorError> {
    let components = tensor
        .iter()
        .map(|(index, component)| {
            let substituted = substitution.apply(model, component)?;
            if index.0 == index.1 {
                info!(mu = %index.0, nu = %index.1, vanishes = substituted.is_literal_zero(), "vacuum check");
            }
            Ok((index, substituted))
        })
        .collect::<Result<Vec<_>, TensorError>>()?;
    Ok(VacuumReport { components })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ricci_compute::symbolic::equals;
    use super::*;
    use crate::{christoffel::Christoffel, ricci::Ricci};

    fn tensor(model: &Model) -> RicciTensor {
        let christoffel = Christoffel::static_spherical(model).unwrap();
        Ricci::new(&christoffel, &model.ansatz).tensor().unwrap()
    }

    #[test]
    fn schwarzschild_is_vacuum() {
        let model = Model::static_spherical();
        let report = check_vacuum(&model, &tensor(&model), &schwarzschild(SymExpr::symbol("M"))).unwrap();
        assert_eq!(report.components.len(), 16);
        for ((mu, nu), component) in &report.components {
            assert!(component.is_literal_zero(), "R_{mu}{nu} = {component}");
        }
        assert!(report.is_vacuum());
    }

    #[test]
    fn schwarzschild_functions() {
        let substitution = schwarzschild(SymExpr::symbol("M"));
        let product = substitution.a.clone() * substitution.b.clone();
        assert!(equals(&product, &SymExpr::one()).unwrap());
    }

    #[test]
    fn non_vacuum_metric() {
        // de Sitter-like: B = 1 - r^2, A = 1/B
        let model = Model::static_spherical();
        let r = SymExpr::symbol("r");
        let b = SymExpr::one() - r.pow(SymExpr::int(2));
        let substitution = MetricSubstitution { a: SymExpr::one() / b.clone(), b };

        let report = check_vacuum(&model, &tensor(&model), &substitution).unwrap();
        assert!(!report.is_vacuum());
        // R_θθ = 3r²
        let expected = SymExpr::int(3) * SymExpr::symbol("r").pow(SymExpr::int(2));
        assert!(equals(report.diagonal(Coordinate::Theta), &expected).unwrap());
    }
}
