//! The Christoffel symbols `Γ^μ_{νρ}` of the metric.
//!
//! The table is sparse: only nonzero entries are stored, and every other entry is the zero
//! expression. A [`ChristoffelBuilder`] collects the entries; [`ChristoffelBuilder::build`] checks
//! that the table is symmetric in its lower indices and freezes it into a [`Christoffel`] table,
//! which has no way to change its entries.

use crate::{coordinate::Coordinate, error::TensorError, model::Model};
use once_cell::sync::Lazy;
use ricci_compute::symbolic::{equals, SymExpr};
use std::collections::BTreeMap;
use tracing::debug;

use Coordinate::{Phi, Theta, R, T};

/// The value of every entry that was not set.
static ZERO: Lazy<SymExpr> = Lazy::new(SymExpr::zero);

/// The indices `(μ, ν, ρ)` of the entry `Γ^μ_{νρ}`.
pub type Index = (Coordinate, Coordinate, Coordinate);

/// Collects the entries of a [`Christoffel`] table.
#[derive(Debug, Clone, Default)]
pub struct ChristoffelBuilder {
    entries: BTreeMap<Index, SymExpr>,
}

impl ChristoffelBuilder {
    /// Creates a builder with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry `Γ^upper_{a b}`, replacing any previous value.
    pub fn set(&mut self, upper: Coordinate, a: Coordinate, b: Coordinate, value: SymExpr) -> &mut Self {
        debug!(%upper, %a, %b, %value, "christoffel entry");
        self.entries.insert((upper, a, b), value);
        self
    }

    /// Sets both `Γ^upper_{a b}` and `Γ^upper_{b a}` to the same value.
    pub fn set_symmetric(&mut self, upper: Coordinate, a: Coordinate, b: Coordinate, value: SymExpr) -> &mut Self {
        if a != b {
            self.set(upper, b, a, value.clone());
        }
        self.set(upper, a, b, value)
    }

    /// Freezes the table.
    ///
    /// Returns [`TensorError::Asymmetric`] if some entry `Γ^μ_{νρ}` is not equal to `Γ^μ_{ρν}`
    /// after simplification, which includes the case where only one of the two was set.
    pub fn build(self) -> Result<Christoffel, TensorError> {
        for (&(upper, a, b), value) in &self.entries {
            if a >= b {
                continue;
            }

            let swapped = self.entries.get(&(upper, b, a)).unwrap_or(&*ZERO);
            if !equals(value, swapped)? {
                return Err(TensorError::Asymmetric { upper, lower: (a, b) });
            }
        }

        // entries set only with the larger index first
        for &(upper, a, b) in self.entries.keys() {
            if a > b && !self.entries.contains_key(&(upper, b, a)) {
                return Err(TensorError::Asymmetric { upper, lower: (a, b) });
            }
        }

        Ok(Christoffel { entries: self.entries })
    }
}

/// An immutable, sparse table of Christoffel symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct Christoffel {
    entries: BTreeMap<Index, SymExpr>,
}

impl Christoffel {
    /// The Christoffel symbols of `ds² = -B dt² + A dr² + r² dθ² + r² sin²θ dφ²`.
    ///
    /// | Symbol | Value |
    /// |---|---|
    /// | `Γ^r_{rr}` | `A' / (2A)` |
    /// | `Γ^r_{tt}` | `B' / (2A)` |
    /// | `Γ^r_{θθ}` | `-r / A` |
    /// | `Γ^r_{φφ}` | `-r sin²θ / A` |
    /// | `Γ^θ_{rθ}`, `Γ^θ_{θr}` | `1 / r` |
    /// | `Γ^θ_{φφ}` | `-sinθ cosθ` |
    /// | `Γ^φ_{rφ}`, `Γ^φ_{φr}` | `1 / r` |
    /// | `Γ^φ_{θφ}`, `Γ^φ_{φθ}` | `cot θ` |
    /// | `Γ^t_{tr}`, `Γ^t_{rt}` | `B' / (2B)` |
    pub fn static_spherical(model: &Model) -> Result<Self, TensorError> {
        let r = model.coordinate(R);
        let theta = model.coordinate(Theta);
        let (a, a_prime) = (model.a.value(), model.a.prime());
        let (b, b_prime) = (model.b.value(), model.b.prime());
        let two = || SymExpr::int(2);

        let mut builder = ChristoffelBuilder::new();
        builder
            .set(R, R, R, a_prime.clone() / (two() * a.clone()))
            .set(R, T, T, b_prime.clone() / (two() * a.clone()))
            .set(R, Theta, Theta, -r.clone() / a.clone())
            .set(R, Phi, Phi, -r.clone() * model.sin_theta_squared() / a.clone())
            .set_symmetric(Theta, R, Theta, SymExpr::one() / r.clone())
            .set(Theta, Phi, Phi, -theta.clone().sin() * theta.clone().cos())
            .set_symmetric(Phi, R, Phi, SymExpr::one() / r)
            .set_symmetric(Phi, Theta, Phi, theta.cot())
            .set_symmetric(T, T, R, b_prime.clone() / (two() * b.clone()));
        builder.build()
    }

    /// Returns the entry `Γ^upper_{a b}`, which is the zero expression if it was never set.
    pub fn get(&self, upper: Coordinate, a: Coordinate, b: Coordinate) -> &SymExpr {
        self.entries.get(&(upper, a, b)).unwrap_or(&*ZERO)
    }

    /// Returns true if the entry `Γ^upper_{a b}` was set.
    pub fn is_set(&self, upper: Coordinate, a: Coordinate, b: Coordinate) -> bool {
        self.entries.contains_key(&(upper, a, b))
    }

    /// Iterates over the entries that were set, in index order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Index, &SymExpr)> {
        self.entries.iter().map(|(&index, value)| (index, value))
    }

    /// Returns the number of entries that were set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry was set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ricci_compute::symbolic::is_zero;
    use super::*;

    fn table() -> Christoffel {
        Christoffel::static_spherical(&Model::static_spherical()).unwrap()
    }

    #[test]
    fn stored_entries() {
        // nine distinct symbols, four of them stored under both lower orderings
        assert_eq!(table().len(), 13);
    }

    #[test]
    fn unset_entries_are_zero() {
        let table = table();
        for upper in Coordinate::ALL {
            for a in Coordinate::ALL {
                for b in Coordinate::ALL {
                    if !table.is_set(upper, a, b) {
                        assert!(is_zero(table.get(upper, a, b)).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn lower_indices_are_symmetric() {
        let table = table();
        for (upper, a, b) in [(Theta, R, Theta), (Phi, R, Phi), (Phi, Theta, Phi), (T, T, R)] {
            assert_eq!(table.get(upper, a, b), table.get(upper, b, a));
            assert!(table.is_set(upper, a, b));
        }
    }

    #[test]
    fn entries_in_index_order() {
        let indices = table().nonzero().map(|(index, _)| index).collect::<Vec<_>>();
        assert_eq!(indices, [
            (T, T, R),
            (T, R, T),
            (R, T, T),
            (R, R, R),
            (R, Theta, Theta),
            (R, Phi, Phi),
            (Theta, R, Theta),
            (Theta, Theta, R),
            (Theta, Phi, Phi),
            (Phi, R, Phi),
            (Phi, Theta, Phi),
            (Phi, Phi, R),
            (Phi, Phi, Theta),
        ]);
    }

    #[test]
    fn missing_counterpart_is_rejected() {
        let mut builder = ChristoffelBuilder::new();
        builder.set(Theta, R, Theta, SymExpr::symbol("r").recip());
        assert_eq!(
            builder.build(),
            Err(TensorError::Asymmetric { upper: Theta, lower: (R, Theta) }),
        );
    }

    #[test]
    fn differently_written_counterpart_is_accepted() {
        let mut builder = ChristoffelBuilder::new();
        builder
            .set(Phi, Theta, Phi, SymExpr::symbol("theta").cot())
            .set(Phi, Phi, Theta, SymExpr::symbol("theta").cos() / SymExpr::symbol("theta").sin());
        assert_eq!(builder.build().map(|table| table.len()), Ok(2));
    }

    #[test]
    fn unequal_counterpart_is_rejected() {
        let mut builder = ChristoffelBuilder::new();
        builder
            .set(T, T, R, SymExpr::symbol("r"))
            .set(T, R, T, SymExpr::symbol("r") * SymExpr::int(2));
        assert!(matches!(builder.build(), Err(TensorError::Asymmetric { upper: T, .. })));
    }
}
