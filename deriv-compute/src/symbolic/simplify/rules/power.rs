//! Simplification rules for powers.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::ops::Pow;

/// Integer powers are only folded if the magnitude of the exponent is at most this value.
const MAX_FOLDED_EXPONENT: u32 = 256;

/// Integer powers are only folded if the result would have at most this many bits. Nested powers
/// like `((10^256)^256)^256` stay symbolic instead of building huge integers.
const MAX_FOLDED_BITS: u64 = 4096;

/// Returns true if the expression is the number `n`, as an integer or a float.
fn is_number(expr: &SymExpr, n: i32) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(i)) => *i == n,
        SymExpr::Primary(Primary::Float(f)) => *f == n,
        _ => false,
    }
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        is_number(rhs, 1).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        is_number(rhs, 0).then(|| SymExpr::integer(1))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `1^a = 1`
pub fn one_to_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        is_number(lhs, 1).then(|| SymExpr::integer(1))
    })?;

    step_collector.push(Step::OneToPower);
    Some(opt)
}

/// Folds integer powers of integers.
///
/// `2^3 = 8`
/// `2^-3 = 8^-1`
///
/// `n^-1` is left as is, since that is how fractions are represented. `0^-n` is also left as is, and
/// so are powers whose result would exceed [`MAX_FOLDED_BITS`].
pub fn power_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_integer()?;
        let exp = rhs.as_integer()?;
        let magnitude = exp.clone().abs().to_u32().filter(|m| *m <= MAX_FOLDED_EXPONENT)?;
        if u64::from(base.significant_bits()) * u64::from(magnitude) > MAX_FOLDED_BITS {
            return None;
        }

        if *exp > 1 {
            Some(SymExpr::integer(base.clone().pow(magnitude)))
        } else if *exp < -1 && !base.is_zero() {
            Some(SymExpr::integer(base.clone().pow(magnitude)).recip())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerNumbers);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, where `b` and `c` are integers.
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Exp(base, inner_exp) = lhs else {
            return None;
        };
        if !inner_exp.is_integer() || !rhs.is_integer() {
            return None;
        }

        Some(SymExpr::pow((**base).clone(), (**inner_exp).clone() * rhs.clone()))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_one(expr, step_collector)
        .or_else(|| power_zero(expr, step_collector))
        .or_else(|| one_to_power(expr, step_collector))
        .or_else(|| power_numbers(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fold_integer_powers() {
        let expr = SymExpr::pow(SymExpr::integer(2), SymExpr::integer(10));
        assert_eq!(power_numbers(&expr, &mut ()), Some(SymExpr::integer(1024)));

        let expr = SymExpr::pow(SymExpr::integer(-3), SymExpr::integer(-2));
        assert_eq!(power_numbers(&expr, &mut ()), Some(SymExpr::integer(9).recip()));
    }

    #[test]
    fn leave_fractions_alone() {
        let expr = SymExpr::integer(5).recip();
        assert_eq!(all(&expr, &mut ()), None);

        let expr = SymExpr::pow(SymExpr::integer(0), SymExpr::integer(-2));
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn trivial_exponents() {
        let x = SymExpr::symbol("x");
        assert_eq!(power_one(&SymExpr::pow(x.clone(), SymExpr::integer(1)), &mut ()), Some(x.clone()));
        assert_eq!(power_zero(&SymExpr::pow(x.clone(), SymExpr::integer(0)), &mut ()), Some(SymExpr::integer(1)));
        assert_eq!(one_to_power(&SymExpr::pow(SymExpr::integer(1), x), &mut ()), Some(SymExpr::integer(1)));
    }

    #[test]
    fn large_powers_stay_symbolic() {
        let expr = SymExpr::pow(SymExpr::integer(3), SymExpr::integer(200));
        assert!(power_numbers(&expr, &mut ()).is_some());

        // 10^256 has 851 bits, so its 256th power is too large to fold
        let big = SymExpr::pow(SymExpr::integer(10), SymExpr::integer(256));
        let big = power_numbers(&big, &mut ()).unwrap();
        assert_eq!(power_numbers(&SymExpr::pow(big, SymExpr::integer(256)), &mut ()), None);

        let ten = SymExpr::integer(10);
        let nested = SymExpr::pow(
            SymExpr::pow(SymExpr::pow(ten, SymExpr::integer(256)), SymExpr::integer(256)),
            SymExpr::integer(256),
        );
        let SymExpr::Exp(base, _) = crate::symbolic::simplify::simplify(&nested) else {
            panic!("expected a power");
        };
        let bits = base.as_integer().map_or(0, |n| u64::from(n.significant_bits()));
        assert!(bits <= MAX_FOLDED_BITS, "base has {bits} bits");
    }
}
