//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`ricci_parser::parser::ast::Expr`] nodes produced by [`ricci_parser`], with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure, and
//! carry no span information.
//!
//! ```
//! use ricci_compute::symbolic::SymExpr;
//! use ricci_parser::parser::{ast::Expr, Parser};
//!
//! let ast_expr = Parser::new("r + (M + r)").try_parse_full::<Expr>().unwrap();
//! let expr = SymExpr::try_from(ast_expr).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("r"),
//!     SymExpr::symbol("M"),
//!     SymExpr::symbol("r"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] rewrites an expression into a canonical rational form: an expanded numerator
//! with exact rational coefficients over a denominator that is a product of powers. The
//! Pythagorean identity is applied while expanding, so the canonical numerator of an expression
//! that is identically zero is always empty. This makes [`is_zero`] and [`equals`] decisions, not
//! heuristics.
//!
//! ```
//! use ricci_compute::symbolic::{equals, SymExpr};
//!
//! let theta = SymExpr::symbol("theta");
//! let lhs = theta.clone().sin().pow(SymExpr::int(2)) + theta.clone().cos().pow(SymExpr::int(2));
//! assert!(equals(&lhs, &SymExpr::int(1)).unwrap());
//! ```

pub mod derivative;
pub mod expr;
pub mod factor;
pub mod fmt;
pub mod simplify;
pub mod subs;

pub use derivative::{derivative, SymbolicDerivativeError};
pub use expr::{Function, Primary, SymExpr};
pub use factor::factor;
pub use fmt::Latex;
pub use simplify::{equals, is_zero, simplify, SimplifyError};
pub use subs::{subs_function, subs_symbol};
