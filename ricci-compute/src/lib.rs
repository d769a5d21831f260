//! Symbolic expressions for the Ricci tensor verifier.
//!
//! This crate provides everything the tensor pipeline needs from a computer algebra system, and
//! nothing more: exact expression trees ([`symbolic::SymExpr`]), differentiation with respect to
//! a named variable, simplification to a canonical rational form (strong enough to decide whether
//! an expression is identically zero), factorization, substitution, and rendering to plain text
//! or LaTeX.

pub mod primitive;
pub mod symbolic;
