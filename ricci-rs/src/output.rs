use ricci_compute::symbolic::{Latex, SymExpr};
use ricci_tensor::{verify::Report, Coordinate};
use std::fmt::Write;

/// How expressions are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// A LaTeX `align` environment.
    Latex,

    /// One `R_xy = ...` line per component.
    Plain,
}

/// A labeled equation `R_{μν} = rhs`.
pub type Row<'a> = ((Coordinate, Coordinate), &'a SymExpr);

/// Renders the rows as a block of equations.
pub fn block(style: Style, rows: &[Row]) -> String {
    let mut out = String::new();
    match style {
        Style::Latex => {
            out.push_str("\\begin{align}\n");
            for (i, ((mu, nu), rhs)) in rows.iter().enumerate() {
                let end = if i + 1 < rows.len() { " \\\\" } else { "" };
                // writing to a `String` cannot fail
                let _ = writeln!(out, "R_{{{}{}}} &= {}{}", mu.latex(), nu.latex(), rhs.as_display(), end);
            }
            out.push_str("\\end{align}\n");
        },
        Style::Plain => {
            for ((mu, nu), rhs) in rows {
                let _ = writeln!(out, "R_{}{} = {}", mu.abbreviation(), nu.abbreviation(), rhs);
            }
        },
    }
    out
}

/// The diagonal components of a report, with `R_{φφ}` written as `sin²θ` times its factored
/// remainder.
pub fn diagonal_rows(report: &Report) -> Vec<Row> {
    Coordinate::ALL
        .into_iter()
        .map(|c| match c {
            Coordinate::Phi => ((c, c), &report.phi_phi_factored),
            c => ((c, c), report.component(c)),
        })
        .collect()
}
