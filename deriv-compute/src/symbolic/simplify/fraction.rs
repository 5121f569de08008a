//! Tools to help manipulate fractions.

use crate::primitive::int;
use crate::symbolic::expr::{SymExpr, Primary};
use rug::Integer;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1. A numerator of
/// `1` is left out, so `1/x` is the power `x^-1` rather than a product.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    if numerator.as_integer().is_some_and(|n| *n == 1) {
        denominator.recip()
    } else {
        numerator * denominator.recip()
    }
}

/// Extracts a numerical fraction from the factors of a [`SymExpr::Mul`].
///
/// Fractions are represented as a [`SymExpr::Mul`] containing a [`Primary::Integer`], and a
/// [`SymExpr::Exp`], where the base is a [`Primary::Integer`] and the exponent is `-1`.
///
/// This function finds two integer factors that match this pattern, removes them, and returns the
/// numerator and denominator. When `denominator_optional` is `true`, the function will return an
/// implied 1 as the denominator if it does not find a valid [`SymExpr::Exp`] in the factors. The
/// remaining factors keep their relative order.
pub(crate) fn extract_integer_fraction(
    factors: &mut Vec<SymExpr>,
    denominator_optional: bool,
) -> Option<(Integer, Integer)> {
    let numerator_idx = factors.iter().position(SymExpr::is_integer)?;
    let denominator_idx = factors.iter().position(SymExpr::is_integer_recip);

    let (numerator, denominator) = match denominator_idx {
        Some(denominator_idx) => {
            // remove the larger index first, so that the smaller index is still valid
            let (first, second) = if numerator_idx > denominator_idx {
                let numerator = factors.remove(numerator_idx);
                (numerator, factors.remove(denominator_idx))
            } else {
                let denominator = factors.remove(denominator_idx);
                (factors.remove(numerator_idx), denominator)
            };
            (first.into_integer()?, second.into_integer_recip()?)
        },
        None if denominator_optional => (factors.remove(numerator_idx).into_integer()?, int(1)),
        None => return None,
    };

    Some((numerator, denominator))
}

/// Extracts an explicit numerical fraction from an expression, replacing the extracted parts of
/// the expression with the integer 1.
///
/// Fractions are extracted as follows:
///
/// - [`Primary::Integer`] `n` -> `n / 1`
/// - [`SymExpr::Mul`] -> `numerator / denominator`, where `numerator` is the first
///   [`Primary::Integer`] factor, and `denominator` is the first integer raised to the power of
///   `-1`, or `1` if there is none
/// - [`SymExpr::Exp`] `n^-1` -> `1 / n`
pub(crate) fn extract_explicit_frac(expr: &mut SymExpr) -> Option<(Integer, Integer)> {
    match expr {
        SymExpr::Primary(Primary::Integer(num)) => {
            Some((std::mem::replace(num, int(1)), int(1)))
        },
        SymExpr::Mul(factors) => extract_integer_fraction(factors, true),
        SymExpr::Exp(..) if expr.is_integer_recip() => {
            let denominator = std::mem::replace(expr, SymExpr::integer(1))
                .into_integer_recip()?;
            Some((int(1), denominator))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn extract_from_product() {
        // 3 * x * 4^-1
        let mut expr = SymExpr::integer(3) * SymExpr::symbol("x") * SymExpr::integer(4).recip();
        assert_eq!(extract_explicit_frac(&mut expr), Some((int(3), int(4))));
        assert_eq!(expr, SymExpr::Mul(vec![SymExpr::symbol("x")]));
    }

    #[test]
    fn extract_reciprocal() {
        let mut expr = SymExpr::integer(2).recip();
        assert_eq!(extract_explicit_frac(&mut expr), Some((int(1), int(2))));
        assert_eq!(expr, SymExpr::integer(1));
    }

    #[test]
    fn unit_numerator_is_a_power() {
        let x = SymExpr::symbol("x");
        assert_eq!(make_fraction(SymExpr::integer(1), x.clone()), x.clone().recip());
        assert_eq!(
            make_fraction(SymExpr::integer(3), x.clone()),
            SymExpr::Mul(vec![SymExpr::integer(3), x.recip()]),
        );
    }

    #[test]
    fn no_fraction() {
        let mut expr = SymExpr::symbol("x") * SymExpr::symbol("x").recip();
        assert_eq!(extract_explicit_frac(&mut expr), None);
    }
}
