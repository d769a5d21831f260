use crate::coordinate::Coordinate;
use ricci_compute::symbolic::{SimplifyError, SymbolicDerivativeError};
use std::fmt::{Display, Formatter, Result};

/// An error that can occur while building the Christoffel table or computing the Ricci tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// An expression could not be differentiated.
    Derivative(SymbolicDerivativeError),

    /// An expression could not be simplified.
    Simplify(SimplifyError),

    /// A Christoffel symbol differs from the one with its lower indices swapped.
    Asymmetric {
        /// The upper index.
        upper: Coordinate,

        /// The lower indices of the entry that was set.
        lower: (Coordinate, Coordinate),
    },
}

impl Display for TensorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Derivative(err) => write!(f, "{}", err),
            Self::Simplify(err) => write!(f, "{}", err),
            Self::Asymmetric { upper, lower: (a, b) } => write!(
                f,
                "Christoffel symbol Γ^{upper}_{{{a}{b}}} differs from Γ^{upper}_{{{b}{a}}}",
            ),
        }
    }
}

impl std::error::Error for TensorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Derivative(err) => Some(err),
            Self::Simplify(err) => Some(err),
            Self::Asymmetric { .. } => None,
        }
    }
}

impl From<SymbolicDerivativeError> for TensorError {
    fn from(err: SymbolicDerivativeError) -> Self {
        Self::Derivative(err)
    }
}

impl From<SimplifyError> for TensorError {
    fn from(err: SimplifyError) -> Self {
        Self::Simplify(err)
    }
}
