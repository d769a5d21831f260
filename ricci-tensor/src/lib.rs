//! The Ricci tensor of a static, spherically symmetric spacetime,
//!
//! ```text
//! ds² = -B(r) dt² + A(r) dr² + r² dθ² + r² sin²θ dφ²
//! ```
//!
//! computed from a hand-derived table of Christoffel symbols through the general contraction
//! formula, and checked against the textbook closed forms.
//!
//! ```
//! use ricci_tensor::{christoffel::Christoffel, model::Model, verify::verify};
//!
//! let model = Model::static_spherical();
//! let christoffel = Christoffel::static_spherical(&model).unwrap();
//! let report = verify(&model, &christoffel).unwrap();
//! assert!(report.passed());
//! ```

pub mod ansatz;
pub mod christoffel;
pub mod coordinate;
pub mod error;
pub mod model;
pub mod partial;
pub mod reference;
pub mod ricci;
pub mod vacuum;
pub mod verify;

pub use coordinate::Coordinate;
pub use error::TensorError;
