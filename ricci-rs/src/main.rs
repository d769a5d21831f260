mod error;
mod output;

use clap::Parser as _;
use error::Error;
use output::{block, diagonal_rows, Style};
use ricci_compute::symbolic::SymExpr;
use ricci_parser::parser::{ast::Expr as AstExpr, Parser};
use ricci_tensor::{
    christoffel::Christoffel,
    model::Model,
    ricci::Ricci,
    vacuum::{check_vacuum, schwarzschild, MetricSubstitution},
    verify::verify,
};
use std::{io::{self, Write}, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Derives the Ricci tensor of ds² = -B(r) dt² + A(r) dr² + r² dθ² + r² sin²θ dφ² from its
/// Christoffel symbols and checks it against the textbook closed forms.
#[derive(Debug, clap::Parser)]
#[command(name = "ricci", version, about)]
struct Cli {
    /// Print plain text instead of a LaTeX align block.
    #[arg(long)]
    plain: bool,

    /// Also check that the Schwarzschild metric (mass M) makes every component vanish.
    #[arg(long)]
    vacuum: bool,

    /// Substitute this function of r for A(r) and print the resulting components.
    #[arg(long = "a", value_name = "EXPR")]
    a: Option<String>,

    /// Substitute this function of r for B(r) and print the resulting components.
    #[arg(long = "b", value_name = "EXPR")]
    b: Option<String>,

    /// Print all 16 components instead of only the diagonal.
    #[arg(long)]
    full: bool,
}

/// Parses an expression given to a command line flag.
fn parse_arg(flag: &'static str, input: &str) -> Result<SymExpr, Error> {
    let to_error = |error| Error::Expr { flag, input: input.to_string(), error };
    let expr = Parser::new(input).try_parse_full::<AstExpr>().map_err(to_error)?;
    SymExpr::try_from(expr).map_err(to_error)
}

/// Parses the `--a` / `--b` flags into a substitution, if either was given. Functions that were not
/// given stay unknown.
fn substitution(cli: &Cli, model: &Model) -> Result<Option<MetricSubstitution>, Error> {
    let a = cli.a.as_deref().map(|a| parse_arg("--a", a)).transpose()?;
    let b = cli.b.as_deref().map(|b| parse_arg("--b", b)).transpose()?;
    if a.is_none() && b.is_none() {
        return Ok(None);
    }
    Ok(Some(MetricSubstitution {
        a: a.unwrap_or_else(|| model.a.value().clone()),
        b: b.unwrap_or_else(|| model.b.value().clone()),
    }))
}

/// Runs the verification, writing the results to `out`. Returns true if every required check
/// passed.
///
/// Command line expressions are parsed before anything is written.
fn run(cli: &Cli, out: &mut impl Write) -> Result<bool, Error> {
    let style = if cli.plain { Style::Plain } else { Style::Latex };
    let model = Model::static_spherical();
    let substitution = substitution(cli, &model)?;

    let christoffel = Christoffel::static_spherical(&model)?;
    info!(entries = christoffel.len(), "christoffel table built");

    let report = verify(&model, &christoffel)?;
    write!(out, "{}", block(style, &diagonal_rows(&report)))?;

    writeln!(out)?;
    writeln!(out, "% === Comparison with the closed forms ===")?;
    for check in &report.checks {
        writeln!(out, "% {}", check)?;
    }
    let mut passed = report.passed();

    if !cli.full && !cli.vacuum && substitution.is_none() {
        return Ok(passed);
    }
    let tensor = Ricci::new(&christoffel, &model.ansatz).tensor()?;

    if cli.full {
        let rows = tensor.iter().collect::<Vec<_>>();
        writeln!(out)?;
        write!(out, "{}", block(style, &rows))?;
        for check in &report.off_diagonal {
            writeln!(out, "% {}", check)?;
        }
    }

    if let Some(substitution) = substitution {
        writeln!(out)?;
        writeln!(out, "% === A(r) = {}, B(r) = {} ===", substitution.a, substitution.b)?;
        let substituted = check_vacuum(&model, &tensor, &substitution)?;
        let rows = substituted
            .components
            .iter()
            .filter(|((mu, nu), _)| cli.full || mu == nu)
            .map(|(index, component)| (*index, component))
            .collect::<Vec<_>>();
        write!(out, "{}", block(style, &rows))?;
    }

    if cli.vacuum {
        let vacuum = check_vacuum(&model, &tensor, &schwarzschild(SymExpr::symbol("M")))?;
        writeln!(out)?;
        writeln!(out, "% Schwarzschild vacuum: {}", vacuum.is_vacuum())?;
        passed &= vacuum.is_vacuum();
    }

    Ok(passed)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(&cli, &mut io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            err.report_to_stderr();
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::{assert_eq, assert_ne};
    use super::*;

    fn run_with(args: &[&str]) -> (Result<bool, Error>, String) {
        let cli = Cli::parse_from(std::iter::once("ricci").chain(args.iter().copied()));
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_run() {
        let (result, out) = run_with(&[]);
        assert!(result.unwrap());
        assert!(out.starts_with("\\begin{align}\n"));
        assert!(out.contains("\\end{align}\n"));
        assert_eq!(out.lines().filter(|line| line.ends_with(": true")).count(), 5);
        assert!(!out.contains(": false"));
    }

    #[test]
    fn invalid_argument_writes_nothing() {
        let (result, out) = run_with(&["--a", "1/("]);
        assert!(matches!(result, Err(Error::Expr { flag: "--a", .. })));
        assert_eq!(out, "");

        let (result, out) = run_with(&["--a", "r", "--b", "sin'(r)"]);
        assert!(matches!(result, Err(Error::Expr { flag: "--b", .. })));
        assert_eq!(out, "");
    }

    #[test]
    fn substitution_keeps_unknown_functions() {
        let model = Model::static_spherical();
        let cli = Cli::parse_from(["ricci", "--b", "1 - 2M/r"]);
        let given = substitution(&cli, &model).unwrap().unwrap();
        assert_eq!(&given.a, model.a.value());
        assert_ne!(&given.b, model.b.value());

        let cli = Cli::parse_from(["ricci"]);
        assert!(substitution(&cli, &model).unwrap().is_none());
    }
}
