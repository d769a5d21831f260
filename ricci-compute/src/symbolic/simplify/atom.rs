//! The indeterminates of the canonical polynomial form.

use crate::symbolic::expr::{Function, SymExpr};
use std::cmp::Ordering;

/// An expression in canonical form, together with its rendering.
///
/// Two canonical expressions are the same if and only if their renderings match, which makes the
/// rendering a total order key for atoms that wrap arbitrary expressions.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalExpr {
    key: String,
    expr: SymExpr,
}

impl CanonicalExpr {
    /// Wraps an expression that is already in canonical form.
    pub(crate) fn new(expr: SymExpr) -> Self {
        Self { key: expr.to_string(), expr }
    }

    /// Returns the wrapped expression.
    pub(crate) fn expr(&self) -> &SymExpr {
        &self.expr
    }
}

impl PartialEq for CanonicalExpr {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CanonicalExpr {}

impl PartialOrd for CanonicalExpr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalExpr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// An indeterminate of a polynomial.
///
/// `sin u` and `cos u` are separate atoms, tied together only by the Pythagorean identity applied
/// in [`Poly`](super::poly::Poly). Anything else the canonical form cannot see through (a
/// non-integer power, an unknown call) is an opaque atom.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Atom {
    /// A variable.
    Symbol(String),

    /// An undetermined function or one of its derivatives.
    Function(Function),

    /// `sin u`, where `u` is canonical and has a positive leading coefficient.
    Sin(CanonicalExpr),

    /// `cos u`, where `u` is canonical and has a positive leading coefficient.
    Cos(CanonicalExpr),

    /// Any other expression, in canonical form.
    Opaque(CanonicalExpr),
}

impl Atom {
    /// Converts the atom back into an expression.
    pub(crate) fn to_expr(&self) -> SymExpr {
        match self {
            Self::Symbol(name) => SymExpr::symbol(name.clone()),
            Self::Function(function) => SymExpr::function(function.clone()),
            Self::Sin(arg) => arg.expr().clone().sin(),
            Self::Cos(arg) => arg.expr().clone().cos(),
            Self::Opaque(expr) => expr.expr().clone(),
        }
    }
}
