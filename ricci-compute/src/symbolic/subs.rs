//! Substitution of symbols and undetermined functions.

use super::{
    derivative::{derivative, SymbolicDerivativeError},
    expr::{Primary, SymExpr},
};

/// Rebuilds an expression bottom-up, replacing each [`Primary`] other than a call with the
/// result of `replace`. Calls are rebuilt with their replaced arguments.
fn map_primaries<E>(
    expr: &SymExpr,
    replace: &mut impl FnMut(&Primary) -> Result<Option<SymExpr>, E>,
) -> Result<SymExpr, E> {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| map_primaries(arg, replace))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SymExpr::call(name.clone(), args))
        },
        SymExpr::Primary(primary) => Ok(replace(primary)?.unwrap_or_else(|| expr.clone())),
        SymExpr::Add(terms) => terms
            .iter()
            .try_fold(SymExpr::Add(Vec::new()), |acc, term| Ok(acc + map_primaries(term, replace)?))
            .map(SymExpr::downgrade),
        SymExpr::Mul(factors) => factors
            .iter()
            .try_fold(SymExpr::Mul(Vec::new()), |acc, factor| Ok(acc * map_primaries(factor, replace)?))
            .map(SymExpr::downgrade),
        SymExpr::Exp(base, exp) => {
            Ok(map_primaries(base, replace)?.pow(map_primaries(exp, replace)?))
        },
    }
}

/// Replaces every occurrence of the symbol `name` with `value`.
///
/// Undetermined functions are left alone, even if `name` is their variable; use
/// [`subs_function`] to replace them.
pub fn subs_symbol(expr: &SymExpr, name: &str, value: &SymExpr) -> SymExpr {
    let result = map_primaries::<std::convert::Infallible>(expr, &mut |primary| match primary {
        Primary::Symbol(sym) if sym == name => Ok(Some(value.clone())),
        _ => Ok(None),
    });
    match result {
        Ok(expr) => expr,
        Err(never) => match never {},
    }
}

/// Replaces the undetermined function `name` with `value`, an expression in the function's
/// variable. The `k`-th derivative of the function is replaced with the `k`-th derivative of
/// `value`.
///
/// ```
/// use ricci_compute::symbolic::{equals, subs_function, Function, SymExpr};
///
/// let r = SymExpr::symbol("r");
/// let a = Function::new("A", "r");
/// let a_prime = a.derivative().unwrap();
///
/// // A'(r) / A(r) with A = r^2
/// let expr = SymExpr::function(a_prime) / SymExpr::function(a);
/// let substituted = subs_function(&expr, "A", &r.clone().pow(SymExpr::int(2))).unwrap();
/// assert!(equals(&substituted, &(SymExpr::int(2) / r)).unwrap());
/// ```
pub fn subs_function(
    expr: &SymExpr,
    name: &str,
    value: &SymExpr,
) -> Result<SymExpr, SymbolicDerivativeError> {
    // derivatives of `value`, indexed by variable, then by order
    let mut derivatives: Vec<(String, Vec<SymExpr>)> = Vec::new();

    map_primaries::<SymbolicDerivativeError>(expr, &mut |primary| {
        let Primary::Function(function) = primary else {
            return Ok(None);
        };
        if function.name != name {
            return Ok(None);
        }

        let index = match derivatives.iter().position(|(var, _)| *var == function.var) {
            Some(index) => index,
            None => {
                derivatives.push((function.var.clone(), vec![value.clone()]));
                derivatives.len() - 1
            },
        };
        let (var, computed) = &mut derivatives[index];
        while computed.len() <= function.order as usize {
            let next = derivative(&computed[computed.len() - 1], var)?;
            computed.push(next);
        }
        Ok(Some(computed[function.order as usize].clone()))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ricci_parser::parser::{ast::Expr as AstExpr, Parser};
    use super::*;
    use crate::symbolic::{equals, is_zero};

    fn parse(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    #[test]
    fn symbol() {
        let expr = subs_symbol(&parse("r^2 + M r"), "M", &SymExpr::int(2));
        assert_eq!(expr, parse("r^2 + 2r"));
    }

    #[test]
    fn symbol_inside_calls() {
        let expr = subs_symbol(&parse("sin(theta) cos(2theta)"), "theta", &SymExpr::symbol("x"));
        assert_eq!(expr, parse("sin(x) cos(2x)"));
    }

    #[test]
    fn symbol_leaves_functions_alone() {
        let expr = parse("A(r) + r");
        assert_eq!(subs_symbol(&expr, "r", &SymExpr::int(1)), parse("A(r) + 1"));
    }

    #[test]
    fn sum_is_flattened() {
        let expr = subs_symbol(&parse("x + 1"), "x", &parse("r + M"));
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("r"),
            SymExpr::symbol("M"),
            SymExpr::int(1),
        ]));
    }

    #[test]
    fn function_and_derivatives() {
        let a = parse("1 / (1 - 2M/r)");
        let b = parse("1 - 2M/r");

        let a_prime = subs_function(&parse("A'(r)"), "A", &a).unwrap();
        assert!(equals(&a_prime, &parse("-2M / (r - 2M)^2")).unwrap());

        let b_second = subs_function(&parse("B''(r)"), "B", &b).unwrap();
        assert!(equals(&b_second, &parse("-4M / r^3")).unwrap());
    }

    #[test]
    fn only_the_named_function() {
        let expr = subs_function(&parse("A(r) + B(r)"), "A", &SymExpr::int(3)).unwrap();
        assert_eq!(expr, parse("3 + B(r)"));
    }

    #[test]
    fn constant_function() {
        let expr = subs_function(&parse("B'(r) + B''(r)"), "B", &parse("1 - 2M")).unwrap();
        assert!(is_zero(&expr).unwrap());
    }
}
