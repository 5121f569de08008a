//! Symbolic derivatives of the functions in [`Func`].

use crate::funcs::Func;
use crate::symbolic::SymExpr;

use super::{derivative, DerivativeError, MultBuilder};

/// `1 - u^2` for `sign = -1`, or `1 + u^2` for `sign = 1`.
fn one_plus_square(u: &SymExpr, sign: i32) -> SymExpr {
    let square = SymExpr::pow(u.clone(), SymExpr::integer(2));
    let square = if sign < 0 { -square } else { square };
    SymExpr::Add(vec![SymExpr::integer(1), square])
}

/// `f(u)^n`
fn call_pow(func: Func, u: &SymExpr, n: i32) -> SymExpr {
    SymExpr::pow(SymExpr::call(func, u.clone()), SymExpr::integer(n))
}

/// The derivative of `func` evaluated at `u`, before the chain rule is applied.
fn outer_derivative(func: Func, u: &SymExpr) -> Result<SymExpr, DerivativeError> {
    let call = |func| SymExpr::call(func, u.clone());
    let neg_half = || -SymExpr::integer(1) * SymExpr::integer(2).recip();

    Ok(match func {
        Func::Sin => call(Func::Cos),
        Func::Cos => -call(Func::Sin),
        Func::Tan => call_pow(Func::Cos, u, -2),
        Func::Cot => -call_pow(Func::Sin, u, -2),
        Func::Sec => call(Func::Sec) * call(Func::Tan),
        Func::Csc => -(call(Func::Csc) * call(Func::Cot)),
        Func::Asin => SymExpr::pow(one_plus_square(u, -1), neg_half()),
        Func::Acos => -SymExpr::pow(one_plus_square(u, -1), neg_half()),
        Func::Atan => one_plus_square(u, 1).recip(),
        Func::Sinh => call(Func::Cosh),
        Func::Cosh => call(Func::Sinh),
        Func::Tanh => call_pow(Func::Cosh, u, -2),
        Func::Exp => call(Func::Exp),
        Func::Ln => u.clone().recip(),
        Func::Abs => call(Func::Sign),
        Func::Sign | Func::Floor | Func::Ceil => return Err(DerivativeError::Unsupported(func)),
    })
}

/// Computes the derivative of a function call and performs the chain rule.
pub(super) fn function_derivative(func: Func, arg: &SymExpr, with: &str) -> Result<SymExpr, DerivativeError> {
    if arg.is_free_of(with) {
        return Ok(SymExpr::integer(0));
    }

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer_derivative(func, arg)?);
    mult_group.mult(derivative(arg, with)?);
    Ok(mult_group.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn sine_of_variable() {
        assert_eq!(function_derivative(Func::Sin, &x(), "x"), Ok(SymExpr::call(Func::Cos, x())));
    }

    #[test]
    fn cosine_is_negated() {
        assert_eq!(
            function_derivative(Func::Cos, &x(), "x"),
            Ok(SymExpr::Mul(vec![SymExpr::integer(-1), SymExpr::call(Func::Sin, x())])),
        );
    }

    #[test]
    fn chain_factor_is_appended() {
        // ln(2x)' = (2x)^-1 * 2
        let arg = SymExpr::integer(2) * x();
        assert_eq!(
            function_derivative(Func::Ln, &arg, "x"),
            Ok(SymExpr::Mul(vec![arg.clone().recip(), SymExpr::integer(2)])),
        );
    }
}
