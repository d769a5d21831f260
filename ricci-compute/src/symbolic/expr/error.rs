//! Errors produced when converting a parsed expression into a [`SymExpr`](super::SymExpr).

use ariadne::Fmt;
use ricci_attrs::ErrorKind;
use ricci_error::{ErrorKind, EXPR};

/// Primes were written after the name of an elementary function, such as `sin'(theta)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}` with primes", name),
    labels = ["primes written here"],
    help = "only undetermined functions such as `A'(r)` can carry primes",
)]
pub struct PrimedElementaryFunction {
    /// The name of the elementary function.
    pub name: String,
}

/// An elementary function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes exactly one argument", name),
    labels = ["this function call", ""],
    help = format!("{} arguments were given", given),
)]
pub struct WrongArgumentCount {
    /// The name of the elementary function.
    pub name: String,

    /// The number of arguments given.
    pub given: usize,
}

/// An undetermined function was applied to something other than a single variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("undetermined function `{}` must be applied to a single variable", name),
    labels = [format!("expected a {} here", "variable".fg(EXPR))],
    help = format!("write it as `{}(r)`", name),
)]
pub struct InvalidFunctionArgument {
    /// The name of the undetermined function.
    pub name: String,
}
