use once_cell::sync::Lazy;
use rug::Integer;
use std::{collections::HashSet, fmt::{Formatter, Result}};
use super::{Latex, Product};
use crate::symbolic::expr::{Function, Primary, SymExpr};

/// Variable names that are rendered as Greek letters.
static GREEK: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
        "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
        "Omega",
    ]
        .into_iter()
        .collect()
});

/// Elementary functions with a LaTeX command of their own.
const TRIG_FUNCTIONS: [&str; 6] = ["sin", "cos", "tan", "cot", "sec", "csc"];

fn fmt_symbol(f: &mut Formatter, name: &str) -> Result {
    if GREEK.contains(name) {
        write!(f, "\\{}", name)
    } else {
        write!(f, "{}", name)
    }
}

/// Writes the parenthesized argument list of a call, `{\left(a, b \right)}`.
fn fmt_args(f: &mut Formatter, args: &[SymExpr]) -> Result {
    write!(f, "{{\\left(")?;
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        arg.fmt_latex(f)?;
        for arg in iter {
            write!(f, ", ")?;
            arg.fmt_latex(f)?;
        }
    }
    write!(f, " \\right)}}")
}

/// Writes the name and primes of an undetermined function.
fn fmt_function_name(f: &mut Formatter, function: &Function) -> Result {
    fmt_symbol(f, &function.name)?;
    write!(f, "{}", "'".repeat(function.order as usize))
}

fn fmt_exponent(f: &mut Formatter, exp: &SymExpr) -> Result {
    write!(f, "^{{")?;
    exp.fmt_latex(f)?;
    write!(f, "}}")
}

/// Writes `base^exp`. Powers of trigonometric functions and unprimed undetermined functions put
/// the exponent on the function name, `\sin^{2}{\left(\theta \right)}`.
fn fmt_power(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> Result {
    let positive_integer = exp.as_integer().is_some_and(|int| *int > 0);
    match base {
        SymExpr::Primary(Primary::Call(name, args))
            if positive_integer && TRIG_FUNCTIONS.contains(&name.as_str()) => {
            write!(f, "\\{}", name)?;
            fmt_exponent(f, exp)?;
            fmt_args(f, args)
        },
        SymExpr::Primary(Primary::Function(function)) if function.order == 0 => {
            fmt_function_name(f, function)?;
            fmt_exponent(f, exp)?;
            fmt_args(f, &[SymExpr::symbol(function.var.clone())])
        },
        SymExpr::Primary(primary @ Primary::Symbol(_)) => {
            primary.fmt_latex(f)?;
            fmt_exponent(f, exp)
        },
        SymExpr::Primary(primary @ Primary::Integer(int)) if *int >= 0 => {
            primary.fmt_latex(f)?;
            fmt_exponent(f, exp)
        },
        SymExpr::Primary(primary @ Primary::Call(name, _)) if name == "sqrt" => {
            primary.fmt_latex(f)?;
            fmt_exponent(f, exp)
        },
        _ => {
            write!(f, "\\left(")?;
            base.fmt_latex(f)?;
            write!(f, "\\right)")?;
            fmt_exponent(f, exp)
        },
    }
}

/// Writes a single factor of a product.
fn fmt_factor(f: &mut Formatter, factor: &SymExpr) -> Result {
    match factor {
        SymExpr::Add(_) | SymExpr::Mul(_) => {
            write!(f, "\\left(")?;
            factor.fmt_latex(f)?;
            write!(f, "\\right)")
        },
        SymExpr::Exp(base, exp) => fmt_power(f, base, exp),
        SymExpr::Primary(primary) => primary.fmt_latex(f),
    }
}

fn fmt_denominator_factor(f: &mut Formatter, base: &SymExpr, exp: &Integer) -> Result {
    if *exp == 1 {
        fmt_factor(f, base)
    } else {
        fmt_power(f, base, &SymExpr::Primary(Primary::Integer(exp.clone())))
    }
}

fn fmt_numerator(f: &mut Formatter, product: &Product) -> Result {
    let mut first = true;
    if product.shows_coefficient() {
        write!(f, "{}", product.coefficient)?;
        first = false;
    }
    for factor in &product.numerator {
        if !first {
            write!(f, " ")?;
        }
        fmt_factor(f, factor)?;
        first = false;
    }
    Ok(())
}

/// Writes a product without its sign, as a `\frac` if it has a denominator.
fn fmt_product(f: &mut Formatter, product: &Product) -> Result {
    if product.denominator.is_empty() {
        return fmt_numerator(f, product);
    }

    write!(f, "\\frac{{")?;
    match product.numerator.as_slice() {
        // the braces of `\frac` already group a lone sum
        [sum @ SymExpr::Add(_)] if !product.shows_coefficient() => sum.fmt_latex(f)?,
        _ => fmt_numerator(f, product)?,
    }
    write!(f, "}}{{")?;
    match product.denominator.as_slice() {
        [(base, exp)] if *exp == 1 => base.fmt_latex(f)?,
        factors => {
            let mut iter = factors.iter();
            if let Some((base, exp)) = iter.next() {
                fmt_denominator_factor(f, base, exp)?;
                for (base, exp) in iter {
                    write!(f, " ")?;
                    fmt_denominator_factor(f, base, exp)?;
                }
            }
        },
    }
    write!(f, "}}")
}

impl Latex for Function {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        fmt_function_name(f, self)?;
        fmt_args(f, &[SymExpr::symbol(self.var.clone())])
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Integer(int) => write!(f, "{}", int),
            Self::Symbol(sym) => fmt_symbol(f, sym),
            Self::Call(name, args) if name == "sqrt" && args.len() == 1 => {
                write!(f, "\\sqrt{{")?;
                args[0].fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Call(name, args) if TRIG_FUNCTIONS.contains(&name.as_str()) => {
                write!(f, "\\{}", name)?;
                fmt_args(f, args)
            },
            Self::Call(name, args) => {
                write!(f, "\\operatorname{{{}}}", name)?;
                fmt_args(f, args)
            },
            Self::Function(function) => function.fmt_latex(f),
        }
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Add(terms) if terms.is_empty() => write!(f, "0"),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    let product = Product::split(term);
                    match (i, product.negative) {
                        (0, true) => write!(f, "-")?,
                        (0, false) => (),
                        (_, true) => write!(f, " - ")?,
                        (_, false) => write!(f, " + ")?,
                    }
                    fmt_product(f, &product)?;
                }
                Ok(())
            },
            term => {
                let product = Product::split(term);
                if product.negative {
                    write!(f, "-")?;
                }
                fmt_product(f, &product)
            },
        }
    }
}
