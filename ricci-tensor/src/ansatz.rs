//! Which coordinates the quantities of a metric ansatz may depend on.

use crate::coordinate::Coordinate;

/// Whether the quantities of an ansatz may depend on a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependence {
    /// Quantities may depend on the coordinate; derivatives with respect to it are computed.
    Free,

    /// No quantity depends on the coordinate; every derivative with respect to it is zero,
    /// whatever the expression being differentiated contains.
    Ignorable,
}

/// A per-coordinate declaration of [`Dependence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ansatz {
    dependence: [Dependence; 4],
}

/// The static, spherically symmetric ansatz: nothing depends on `t` or `phi`.
pub const STATIC_SPHERICAL: Ansatz = Ansatz::new([
    Dependence::Ignorable,
    Dependence::Free,
    Dependence::Free,
    Dependence::Ignorable,
]);

impl Ansatz {
    /// Creates an ansatz from the dependence of each coordinate, in index order.
    pub const fn new(dependence: [Dependence; 4]) -> Self {
        Self { dependence }
    }

    /// Returns the dependence declared for the coordinate.
    pub fn dependence(&self, coordinate: Coordinate) -> Dependence {
        self.dependence[coordinate.index()]
    }

    /// Returns true if quantities may depend on the coordinate.
    pub fn is_free(&self, coordinate: Coordinate) -> bool {
        self.dependence(coordinate) == Dependence::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_spherical() {
        let free = Coordinate::ALL
            .into_iter()
            .filter(|&coordinate| STATIC_SPHERICAL.is_free(coordinate))
            .collect::<Vec<_>>();
        assert_eq!(free, [Coordinate::R, Coordinate::Theta]);
    }
}
