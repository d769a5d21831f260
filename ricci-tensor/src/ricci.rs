//! The Ricci tensor, contracted from the Christoffel symbols:
//!
//! ```text
//! R_{μν} = Σ_ρ ∂_ρ Γ^ρ_{μν} - Σ_ρ ∂_ν Γ^ρ_{μρ} + Σ_{ρσ} Γ^ρ_{ρσ} Γ^σ_{μν} - Σ_{ρσ} Γ^ρ_{νσ} Γ^σ_{μρ}
//! ```

use crate::{
    ansatz::Ansatz,
    christoffel::Christoffel,
    coordinate::Coordinate,
    error::TensorError,
    partial::partial,
};
use ricci_compute::symbolic::{simplify, SymExpr};
use tracing::{debug, instrument, trace};

/// Adds up the given terms.
fn sum(mut terms: Vec<SymExpr>) -> SymExpr {
    match terms.len() {
        0 => SymExpr::zero(),
        1 => terms.remove(0),
        _ => SymExpr::Add(terms),
    }
}

/// Computes components of the Ricci tensor from a Christoffel table.
#[derive(Debug, Clone, Copy)]
pub struct Ricci<'a> {
    christoffel: &'a Christoffel,
    ansatz: &'a Ansatz,
}

impl<'a> Ricci<'a> {
    /// Creates an evaluator over the given table. Partial derivatives follow the coordinate
    /// dependence declared by `ansatz`.
    pub fn new(christoffel: &'a Christoffel, ansatz: &'a Ansatz) -> Self {
        Self { christoffel, ansatz }
    }

    /// Computes `R_{μν}` without simplifying the result.
    ///
    /// Terms whose Christoffel factor is zero are left out.
    pub fn raw(&self, mu: Coordinate, nu: Coordinate) -> Result<SymExpr, TensorError> {
        let gamma = |upper, a, b| self.christoffel.get(upper, a, b);
        let mut terms = Vec::new();

        for rho in Coordinate::ALL {
            let entry = gamma(rho, mu, nu);
            if !entry.is_literal_zero() {
                terms.push(partial(entry, rho, self.ansatz)?);
            }

            let entry = gamma(rho, mu, rho);
            if !entry.is_literal_zero() {
                terms.push(-partial(entry, nu, self.ansatz)?);
            }
        }

        for rho in Coordinate::ALL {
            for sigma in Coordinate::ALL {
                let (lhs, rhs) = (gamma(rho, rho, sigma), gamma(sigma, mu, nu));
                if !lhs.is_literal_zero() && !rhs.is_literal_zero() {
                    terms.push(lhs.clone() * rhs.clone());
                }

                let (lhs, rhs) = (gamma(rho, nu, sigma), gamma(sigma, mu, rho));
                if !lhs.is_literal_zero() && !rhs.is_literal_zero() {
                    terms.push(-(lhs.clone() * rhs.clone()));
                }
            }
        }

        let raw = sum(terms);
        trace!(%mu, %nu, nodes = raw.post_order_iter().count(), "raw contraction");
        Ok(raw)
    }

    /// Computes and simplifies `R_{μν}`.
    #[instrument(level = "debug", skip(self))]
    pub fn component(&self, mu: Coordinate, nu: Coordinate) -> Result<SymExpr, TensorError> {
        let component = simplify(&self.raw(mu, nu)?)?;
        debug!(%component, "ricci component");
        Ok(component)
    }

    /// Computes and simplifies all 16 components.
    #[instrument(level = "debug", skip(self))]
    pub fn tensor(&self) -> Result<RicciTensor, TensorError> {
        let mut components = Vec::with_capacity(16);
        for mu in Coordinate::ALL {
            for nu in Coordinate::ALL {
                components.push(self.component(mu, nu)?);
            }
        }
        Ok(RicciTensor { components })
    }
}

/// All 16 simplified components of the Ricci tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct RicciTensor {
    components: Vec<SymExpr>,
}

impl RicciTensor {
    /// Returns the component `R_{μν}`.
    pub fn get(&self, mu: Coordinate, nu: Coordinate) -> &SymExpr {
        &self.components[mu.index() * 4 + nu.index()]
    }

    /// Iterates over the components in index order.
    pub fn iter(&self) -> impl Iterator<Item = ((Coordinate, Coordinate), &SymExpr)> {
        Coordinate::ALL
            .into_iter()
            .flat_map(|mu| Coordinate::ALL.into_iter().map(move |nu| (mu, nu)))
            .zip(&self.components)
    }
}

#[cfg(test)]
mod tests {
    use ricci_compute::symbolic::{equals, is_zero};
    use super::*;
    use crate::{ansatz::STATIC_SPHERICAL, model::Model};

    use Coordinate::{Phi, Theta, R, T};

    #[test]
    fn raw_and_simplified_agree() {
        let model = Model::static_spherical();
        let christoffel = Christoffel::static_spherical(&model).unwrap();
        let ricci = Ricci::new(&christoffel, &STATIC_SPHERICAL);

        let raw = ricci.raw(Theta, Theta).unwrap();
        let component = ricci.component(Theta, Theta).unwrap();
        assert!(equals(&raw, &component).unwrap());
    }

    #[test]
    fn symmetric_and_diagonal() {
        let model = Model::static_spherical();
        let christoffel = Christoffel::static_spherical(&model).unwrap();
        let tensor = Ricci::new(&christoffel, &STATIC_SPHERICAL).tensor().unwrap();

        for ((mu, nu), component) in tensor.iter() {
            assert!(equals(component, tensor.get(nu, mu)).unwrap(), "R_{mu}{nu} != R_{nu}{mu}");
            if mu != nu {
                assert!(is_zero(component).unwrap(), "R_{mu}{nu} = {component}");
            }
        }
    }

    #[test]
    fn flat_space() {
        // A = B = 1: only the angular symbols survive, and the tensor vanishes
        let r = SymExpr::symbol("r");
        let theta = SymExpr::symbol("theta");
        let mut builder = crate::christoffel::ChristoffelBuilder::new();
        builder
            .set(R, Theta, Theta, -r.clone())
            .set(R, Phi, Phi, -r.clone() * theta.clone().sin().pow(SymExpr::int(2)))
            .set_symmetric(Theta, R, Theta, r.clone().recip())
            .set(Theta, Phi, Phi, -theta.clone().sin() * theta.clone().cos())
            .set_symmetric(Phi, R, Phi, r.recip())
            .set_symmetric(Phi, Theta, Phi, theta.cot());
        let christoffel = builder.build().unwrap();

        let tensor = Ricci::new(&christoffel, &STATIC_SPHERICAL).tensor().unwrap();
        for ((mu, nu), component) in tensor.iter() {
            assert!(is_zero(component).unwrap(), "R_{mu}{nu} = {component}");
        }
    }

    #[test]
    fn empty_table() {
        let christoffel = crate::christoffel::ChristoffelBuilder::new().build().unwrap();
        let ricci = Ricci::new(&christoffel, &STATIC_SPHERICAL);
        assert!(ricci.raw(T, R).unwrap().is_literal_zero());
    }
}
