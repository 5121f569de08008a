//! Symbolic differentiation.
//!
//! [`derivative`] walks the expression once, applying the sum rule, the generalized product rule,
//! the power / exponential rules, and the chain rule through the table in [`function`]. Obvious
//! zero and one factors are removed while the result is built, but nothing else is simplified;
//! see [`crate::symbolic::simplify`] for that.

use crate::funcs::{Func, NamedConst};
use super::expr::Primary;
use super::SymExpr;

mod function;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up trees
/// and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => f.is_zero(),
        SymExpr::Primary(Primary::Integer(i)) => i.is_zero(),
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        // `0^e` is only zero for positive `e`; `0^-1` is a division by zero
        SymExpr::Exp(base, exponent) => is_trivially_zero(base) && is_positive_number(exponent),
        _ => false,
    }
}

fn is_positive_number(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => *f > 0,
        SymExpr::Primary(Primary::Integer(i)) => *i > 0,
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up trees
/// and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => *f == 1,
        SymExpr::Primary(Primary::Integer(i)) => *i == 1,
        SymExpr::Primary(Primary::Call(Func::Ln, arg)) => {
            matches!(**arg, SymExpr::Primary(Primary::Named(NamedConst::E)))
        },
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::integer(0)];
            return;
        }

        if is_trivially_unity(&e) {
            return;
        }

        // keep nested products flat
        match e {
            SymExpr::Mul(factors) => self.0.extend(factors),
            e => self.0.push(e),
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        match e {
            e if is_trivially_zero(&e) => {},
            SymExpr::Add(terms) => self.0.extend(terms),
            e => self.0.push(e),
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, DerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, DerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let factor_derivative = derivative(&product[derivative_index], with)?;
        if is_trivially_zero(&factor_derivative) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(factor_derivative.clone());
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Returns `exponent - 1`, folding numeric exponents.
fn decrement(exponent: &SymExpr) -> SymExpr {
    match exponent {
        SymExpr::Primary(Primary::Integer(i)) => SymExpr::Primary(Primary::Integer(i.clone() - 1)),
        SymExpr::Primary(Primary::Float(f)) => SymExpr::Primary(Primary::Float(f.clone() - 1)),
        exponent => SymExpr::Add(vec![exponent.clone(), SymExpr::integer(-1)]),
    }
}

/// Differentiates `base^exponent`, picking the rule by which of the two depend on the variable.
fn power_rule(base: &SymExpr, exponent: &SymExpr, with: &str) -> Result<SymExpr, DerivativeError> {
    let mut mult_group = MultBuilder::default();

    match (base.is_free_of(with), exponent.is_free_of(with)) {
        (true, true) => return Ok(SymExpr::integer(0)),

        // (u^c)' = c * u^(c - 1) * u'
        (false, true) => {
            mult_group.mult(exponent.clone());
            mult_group.mult(SymExpr::pow(base.clone(), decrement(exponent)));
            mult_group.mult(derivative(base, with)?);
        },

        // (c^u)' = c^u * ln(c) * u'
        (true, false) => {
            mult_group.mult(SymExpr::pow(base.clone(), exponent.clone()));
            mult_group.mult(SymExpr::call(Func::Ln, base.clone()));
            mult_group.mult(derivative(exponent, with)?);
        },

        // (u^v)' = u^v * (v' * ln(u) + v * u' / u)
        (false, false) => {
            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exponent, with)?);
            log_term.mult(SymExpr::call(Func::Ln, base.clone()));

            let mut base_term = MultBuilder::default();
            base_term.mult(exponent.clone());
            base_term.mult(derivative(base, with)?);
            base_term.mult(base.clone().recip());

            let mut sum = SumBuilder::default();
            sum.add(log_term.into());
            sum.add(base_term.into());

            mult_group.mult(SymExpr::pow(base.clone(), exponent.clone()));
            mult_group.mult(sum.into());
        },
    }

    Ok(mult_group.into())
}

/// An error that can occur while differentiating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeError {
    /// The function has no closed-form derivative.
    Unsupported(Func),
}

/// Computes the derivative of the given expression with respect to the variable `with`. Returns
/// [`Err`] if the derivative could not be symbolically computed.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, DerivativeError> {
    if is_trivially_zero(f) {
        return Ok(SymExpr::integer(0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Float(_) | Primary::Integer(_) | Primary::Named(_)) => {
            SymExpr::integer(0)
        },
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                SymExpr::integer(1)
            } else {
                SymExpr::integer(0)
            }
        },
        SymExpr::Primary(Primary::Call(func, arg)) => function::function_derivative(*func, arg, with)?,
        SymExpr::Add(terms) => sum_rule(terms, with)?,
        SymExpr::Mul(factors) => product_rule(factors, with)?,
        SymExpr::Exp(base, exponent) => power_rule(base, exponent, with)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::integer(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
pub mod tests {
    use assert_float_eq::{afe_is_relative_eq, afe_relative_error_msg, afe_abs, assert_float_relative_eq};
    use crate::symbolic::expr::lower::lower;
    use deriv_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(function: &str) -> SymExpr {
        let ast = Parser::new(function).try_parse_full::<AstExpr>().unwrap();
        lower(&ast, "x").unwrap()
    }

    /// Symbolic derivative of the function, unsimplified.
    fn derive(function: &str) -> SymExpr {
        derivative(&parse(function), "x")
            .unwrap_or_else(|err| panic!("derivative of \"{function}\" failed: {err:?}"))
    }

    /// Central finite difference of the provided expression.
    fn finite_difference(e: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (e.eval("x", x + DX) - e.eval("x", x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let expr = parse(function);
        let symbolic = derive(function);

        for point in points {
            let symbolically_computed = symbolic.eval("x", point);
            let numerically_computed = finite_difference(&expr, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL * numerically_computed.abs().max(1.0),
                "For \"{function}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
            );
        }
    }

    #[test]
    fn constant_and_variable() {
        assert_eq!(derive("5"), SymExpr::integer(0));
        assert_eq!(derive("pi"), SymExpr::integer(0));
        assert_eq!(derive("x"), SymExpr::integer(1));
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("3x^4 - 2x^(1.5)", [0.5, 1., 2.]);
        test_for_function("sqrt(x^2 + 1)", [-2., 0., 3.]);
        test_for_function("1/x", [-3., -0.5, 0.5, 4.]);
    }

    #[test]
    fn linearity() {
        let pairs = [
            ("x^2", "sin(x)"),
            ("3x^3", "exp(2x)"),
            ("ln(x^2 + 1)", "x cos(x)"),
            ("1/x", "sqrt(x^2 + 4)"),
        ];

        for (a, b) in pairs {
            let sum = derive(&format!("{a} + {b}"));
            let separate = derive(a) + derive(b);
            for point in [-2.5, -0.7, 0.3, 1.0, 4.2] {
                let lhs = sum.eval("x", point);
                let rhs = separate.eval("x", point);
                assert!(
                    (lhs - rhs).abs() <= 1e-9 * rhs.abs().max(1.0),
                    "d({a} + {b}) = {lhs} but d({a}) + d({b}) = {rhs} at x={point}",
                );
            }
        }
    }

    #[test]
    fn division_by_zero_is_not_zero() {
        let expr = SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::integer(0).recip()]);
        assert!(!is_trivially_zero(&expr));
        assert!(derive("x/0").eval("x", 1.0).is_infinite());

        // 0^2 still is
        assert!(is_trivially_zero(&SymExpr::pow(SymExpr::integer(0), SymExpr::integer(2))));
    }

    #[test]
    fn fifth_power() {
        let symbolic = derive("x^5");
        assert_float_relative_eq!(symbolic.eval("x", 2.0), 80.0, 1e-12);
        // 5 * (-1)^4
        assert_float_relative_eq!(symbolic.eval("x", -1.0), 5.0, 1e-12);
    }

    #[test]
    fn product_rule() {
        let symbolic = derive("sin(x) x^2");
        let expected = 1.0f64.cos() + 2.0 * 1.0f64.sin();
        assert_float_relative_eq!(symbolic.eval("x", 1.0), expected, 1e-9);
        test_for_function("x sin(x) cos(x)", [-1., 0.3, 2.]);
    }

    #[test]
    fn chain_rule() {
        assert_float_relative_eq!(derive("sin(2x)").eval("x", 0.0), 2.0, 1e-12);
        test_for_function("cos(x^2)", [-1., 0.5, 2.]);
        test_for_function("tan(3x) + cot(x)", [0.2, 1.]);
        test_for_function("sec(x) csc(x)", [0.4, 1.1]);
        test_for_function("asin(x/2) + acos(x/3) + atan(x)", [-0.9, 0., 0.7]);
        test_for_function("sinh(x) + cosh(2x) + tanh(x)", [-1., 0., 1.]);
        test_for_function("exp(x^2) + ln(x^2 + 1)", [-1., 0.5, 1.]);
        test_for_function("abs(x^3)", [-2., 1.5]);
    }

    #[test]
    fn exponential_rule() {
        test_for_function("2^x", [-1., 0., 3.]);
        test_for_function("e^(3x)", [-1., 0., 0.5]);

        // ln(e) is dropped from e^x
        let symbolic = derive("e^x");
        assert_eq!(symbolic, SymExpr::pow(SymExpr::Primary(Primary::Named(NamedConst::E)), SymExpr::symbol("x")));
    }

    #[test]
    fn logarithmic_rule() {
        test_for_function("x^x", [0.5, 1., 2.]);
        test_for_function("(x^2 + 1)^sin(x)", [-1., 0., 1.5]);
    }

    #[test]
    fn piecewise_constant_functions() {
        assert_eq!(
            derivative(&parse("floor(x) + 1"), "x"),
            Err(DerivativeError::Unsupported(Func::Floor)),
        );
        // no dependence on the variable, so the chain rule never reaches the table
        assert_eq!(derive("sign(2)"), SymExpr::integer(0));
    }
}
