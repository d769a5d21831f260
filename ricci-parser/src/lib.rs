//! Tokenizer and parser for the small expression language used to describe metric functions.
//!
//! The language covers what a physicist writes down for a component of a metric: numbers, names,
//! calls such as `sin(theta)`, primed calls such as `A'(r)` for derivatives of undetermined
//! functions, the operators `+ - * / ^`, parentheses, and implicit multiplication (`2M`,
//! `r sin(theta)`).
//!
//! ```
//! use ricci_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("1 - 2M/r").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "1 - 2M / r");
//! ```

pub mod parser;
pub mod tokenizer;
