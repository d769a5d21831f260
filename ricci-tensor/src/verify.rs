//! Comparison of the computed Ricci tensor against its closed forms.

use crate::{
    christoffel::Christoffel,
    coordinate::Coordinate,
    error::TensorError,
    model::Model,
    reference,
    ricci::Ricci,
};
use ricci_compute::symbolic::{equals, factor, is_zero, SymExpr};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::info;

/// The outcome of a single comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// What was compared.
    pub name: String,

    /// Whether the comparison succeeded.
    pub passed: bool,
}

impl Check {
    fn new(name: String, passed: bool) -> Self {
        info!(check = %name, passed, "verification check");
        Self { name, passed }
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.name, self.passed)
    }
}

/// The computed diagonal components and the outcome of every check.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The simplified diagonal components `R_tt`, `R_rr`, `R_θθ`, `R_φφ`, in that order.
    pub diagonal: Vec<(Coordinate, SymExpr)>,

    /// `R_φφ` written as `sin²θ` times the factored remainder.
    pub phi_phi_factored: SymExpr,

    /// The four component comparisons, followed by the factorization check. All of them must
    /// pass.
    pub checks: Vec<Check>,

    /// Whether each off-diagonal component vanishes. These are reported, but are not required.
    pub off_diagonal: Vec<Check>,
}

impl Report {
    /// Returns true if every required check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// Returns the computed component `R_{cc}`.
    pub fn component(&self, coordinate: Coordinate) -> &SymExpr {
        &self.diagonal[coordinate.index()].1
    }
}

/// Computes the diagonal Ricci components from the Christoffel table and compares each with its
/// closed form. Then checks that `R_φφ / sin²θ` factors back into `R_θθ`.
///
/// A mismatch is reported as a failed [`Check`], never as an error. Errors come only from the
/// underlying differentiation and simplification.
pub fn verify(model: &Model, christoffel: &Christoffel) -> Result<Report, TensorError> {
    let ricci = Ricci::new(christoffel, &model.ansatz);

    let mut diagonal = Vec::with_capacity(4);
    let mut checks = Vec::with_capacity(5);
    for coordinate in Coordinate::ALL {
        let computed = ricci.component(coordinate, coordinate)?;
        let manual = reference::diagonal(model, coordinate);
        let passed = is_zero(&(computed.clone() - manual))?;

        let name = coordinate.abbreviation();
        checks.push(Check::new(format!("R_{name}{name} matches"), passed));
        diagonal.push((coordinate, computed));
    }

    let theta_theta = &diagonal[Coordinate::Theta.index()].1;
    let phi_phi = &diagonal[Coordinate::Phi.index()].1;
    let sin_squared = model.sin_theta_squared();
    let remainder = factor(&(phi_phi.clone() / sin_squared.clone()))?;
    let phi_phi_factored = SymExpr::Mul(vec![sin_squared, remainder.clone()]);
    let passed = equals(&phi_phi_factored, phi_phi)? && equals(&remainder, theta_theta)?;
    checks.push(Check::new("R_phph = sin^2(theta) R_thth".to_string(), passed));

    let mut off_diagonal = Vec::with_capacity(12);
    for mu in Coordinate::ALL {
        for nu in Coordinate::ALL {
            if mu == nu {
                continue;
            }
            let passed = is_zero(&ricci.component(mu, nu)?)?;
            off_diagonal.push(Check::new(
                format!("R_{}{} vanishes", mu.abbreviation(), nu.abbreviation()),
                passed,
            ));
        }
    }

    Ok(Report { diagonal, phi_phi_factored, checks, off_diagonal })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::christoffel::ChristoffelBuilder;

    use Coordinate::{Phi, Theta, R, T};

    #[test]
    fn static_spherical_passes() {
        let model = Model::static_spherical();
        let christoffel = Christoffel::static_spherical(&model).unwrap();
        let report = verify(&model, &christoffel).unwrap();

        let names = report.checks.iter().map(|check| check.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, [
            "R_tt matches",
            "R_rr matches",
            "R_thth matches",
            "R_phph matches",
            "R_phph = sin^2(theta) R_thth",
        ]);
        assert!(report.passed(), "{:#?}", report.checks);
        assert_eq!(report.off_diagonal.len(), 12);
        assert!(report.off_diagonal.iter().all(|check| check.passed));
    }

    #[test]
    fn phi_phi_is_sin_squared_theta_theta() {
        let model = Model::static_spherical();
        let christoffel = Christoffel::static_spherical(&model).unwrap();
        let report = verify(&model, &christoffel).unwrap();

        let quotient = report.component(Phi).clone() / model.sin_theta_squared();
        assert!(equals(&quotient, report.component(Theta)).unwrap());
        assert!(equals(&report.phi_phi_factored, report.component(Phi)).unwrap());
    }

    #[test]
    fn wrong_entry_is_a_mismatch_not_an_error() {
        let model = Model::static_spherical();
        let r = model.coordinate(R);
        let theta = model.coordinate(Theta);
        let (a, a_prime) = (model.a.value().clone(), model.a.prime().clone());
        let (b, b_prime) = (model.b.value().clone(), model.b.prime().clone());

        // Γ^r_{rr} with the factor of 2 dropped
        let mut builder = ChristoffelBuilder::new();
        builder
            .set(R, R, R, a_prime / a.clone())
            .set(R, T, T, b_prime.clone() / (SymExpr::int(2) * a.clone()))
            .set(R, Theta, Theta, -r.clone() / a.clone())
            .set(R, Phi, Phi, -r.clone() * model.sin_theta_squared() / a)
            .set_symmetric(Theta, R, Theta, r.clone().recip())
            .set(Theta, Phi, Phi, -theta.clone().sin() * theta.clone().cos())
            .set_symmetric(Phi, R, Phi, r.recip())
            .set_symmetric(Phi, Theta, Phi, theta.cot())
            .set_symmetric(T, T, R, b_prime / (SymExpr::int(2) * b));
        let christoffel = builder.build().unwrap();

        let report = verify(&model, &christoffel).unwrap();
        assert!(!report.passed());
        assert!(!report.checks[R.index()].passed);
        // R_θθ and R_φφ involve Γ^r_{rr} too, but their ratio is still sin²θ
        assert!(report.checks[4].passed);
    }

    #[test]
    fn check_display() {
        let check = Check { name: "R_tt matches".to_string(), passed: true };
        assert_eq!(check.to_string(), "R_tt matches: true");
    }
}
