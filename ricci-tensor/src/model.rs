//! The coordinates and unknown functions of the metric
//! `ds² = -B(r) dt² + A(r) dr² + r² dθ² + r² sin²θ dφ²`.

use crate::{
    ansatz::{Ansatz, STATIC_SPHERICAL},
    coordinate::Coordinate,
};
use ricci_compute::symbolic::{Function, SymExpr};

/// An unknown function of `r` appearing in the metric, together with its first and second
/// derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFunction {
    name: String,
    value: SymExpr,
    prime: SymExpr,
    second: SymExpr,
}

impl MetricFunction {
    /// Declares the function `name(r)`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let derived = |order| SymExpr::function(Function {
            name: name.clone(),
            var: Coordinate::R.symbol().to_string(),
            order,
        });

        Self {
            value: derived(0),
            prime: derived(1),
            second: derived(2),
            name,
        }
    }

    /// The name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The function itself, `A(r)`.
    pub fn value(&self) -> &SymExpr {
        &self.value
    }

    /// The first derivative, `A'(r)`.
    pub fn prime(&self) -> &SymExpr {
        &self.prime
    }

    /// The second derivative, `A''(r)`.
    pub fn second(&self) -> &SymExpr {
        &self.second
    }
}

/// The coordinates, ansatz and unknown functions of the metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// The declared coordinate dependence.
    pub ansatz: Ansatz,

    /// The radial function `A(r)`, the `dr²` coefficient.
    pub a: MetricFunction,

    /// The temporal function `B(r)`, minus the `dt²` coefficient.
    pub b: MetricFunction,
}

impl Model {
    /// The static, spherically symmetric model with unknown functions `A(r)` and `B(r)`.
    pub fn static_spherical() -> Self {
        Self {
            ansatz: STATIC_SPHERICAL,
            a: MetricFunction::new("A"),
            b: MetricFunction::new("B"),
        }
    }

    /// Returns the coordinate as a variable.
    pub fn coordinate(&self, coordinate: Coordinate) -> SymExpr {
        SymExpr::symbol(coordinate.symbol())
    }

    /// Returns `sin(theta)^2`, the factor relating the two angular components of the metric.
    pub fn sin_theta_squared(&self) -> SymExpr {
        self.coordinate(Coordinate::Theta).sin().pow(SymExpr::int(2))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::static_spherical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivatives_are_derived_from_the_value() {
        let model = Model::static_spherical();
        assert_eq!(model.a.value().to_string(), "A(r)");
        assert_eq!(model.a.prime().to_string(), "A'(r)");
        assert_eq!(model.b.second().to_string(), "B''(r)");
        assert_eq!(model.b.name(), "B");
    }
}
