use crate::primitive::{int_from_str, rational_from_decimal_str};
use ricci_error::Error;
use ricci_parser::parser::{
    ast::{Call, Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::{error::*, is_elementary, Function, Primary, SymExpr};

/// Converts a call in the AST. Elementary functions become [`Primary::Call`]s; any other name is
/// an undetermined [`Function`] of a single variable.
fn convert_call(call: Call) -> Result<SymExpr, Error> {
    let name = call.name.name.clone();

    if is_elementary(&name) {
        if call.derivatives > 0 {
            return Err(Error::new(
                vec![call.name.span.end..call.paren_span.start],
                PrimedElementaryFunction { name },
            ));
        }

        if call.args.len() != 1 {
            return Err(Error::new(
                call.outer_span().to_vec(),
                WrongArgumentCount { name, given: call.args.len() },
            ));
        }

        let args = call.args
            .into_iter()
            .map(SymExpr::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(SymExpr::call(name, args));
    }

    match call.args.as_slice() {
        [arg] => match arg.innermost() {
            AstExpr::Literal(Literal::Symbol(var)) => Ok(SymExpr::function(Function {
                name,
                var: var.name.clone(),
                order: call.derivatives,
            })),
            other => Err(Error::new(vec![other.span()], InvalidFunctionArgument { name })),
        },
        _ => Err(Error::new(vec![call.paren_span.clone()], InvalidFunctionArgument { name })),
    }
}

/// Converts a parsed expression into a [`SymExpr`]. Conversion is lossy: span information is
/// dropped, and sums and products are flattened.
impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(literal) => Ok(match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::rational(rational_from_decimal_str(&float.value)),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            }),
            AstExpr::Paren(paren) => Self::try_from(paren.into_innermost()),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Ok(-Self::try_from(*unary.operand)?),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                Ok(match bin.op.kind {
                    BinOpKind::Exp => lhs.pow(rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ricci_parser::parser::Parser;
    use super::*;

    fn convert(input: &str) -> Result<SymExpr, Error> {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr)
    }

    #[test]
    fn primed_elementary_function() {
        let err = convert("sin''(theta)").unwrap_err();
        assert_eq!(err.spans, vec![3..5]);
    }

    #[test]
    fn wrong_argument_count() {
        let err = convert("cos(theta, phi)").unwrap_err();
        assert_eq!(err.spans, vec![0..3, 14..15]);
    }

    #[test]
    fn function_of_an_expression() {
        let err = convert("A(2r)").unwrap_err();
        assert_eq!(err.spans, vec![2..4]);
    }

    #[test]
    fn function_of_two_variables() {
        let err = convert("A(r, theta)").unwrap_err();
        assert_eq!(err.spans, vec![1..11]);
    }

    #[test]
    fn parenthesized_function_variable() {
        let expr = convert("B'((r))").unwrap();
        assert_eq!(expr, SymExpr::function(Function {
            name: "B".to_string(),
            var: "r".to_string(),
            order: 1,
        }));
    }
}
