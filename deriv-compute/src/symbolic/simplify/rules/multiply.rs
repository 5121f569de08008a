//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{fraction::{extract_integer_fraction, make_fraction}, rules::{do_multiply, fold_numbers, multiply_numbers}, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter()
            .any(|factor| factor.as_integer().is_some_and(|n| n.is_zero()))
            .then(|| SymExpr::integer(0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut kept = factors.to_vec();
        kept.retain(|factor| factor.as_integer().map_or(true, |n| *n != 1));
        (kept.len() < factors.len()).then(|| SymExpr::Mul(kept).downgrade())
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*a*3 = 6*a`
pub fn multiply_numbers_together(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        fold_numbers(factors, multiply_numbers).map(|factors| SymExpr::Mul(factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Simplifies numerical fractions.
///
/// `3/12 = 1/4`
/// `12/3 = 4`
pub fn reduce_numerical_fraction(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();

        // extract a fraction, a Integer and a Integer^-1
        let (numerator, denominator) = extract_integer_fraction(&mut new_factors, false)?;

        // reduce the fraction
        let gcd = numerator.clone().gcd(&denominator);
        if gcd == 1 {
            return None;
        }

        let numerator = SymExpr::integer(numerator / &gcd);
        let denominator = denominator / &gcd;
        let fraction = if denominator == 1 {
            numerator
        } else {
            make_fraction(numerator, SymExpr::integer(denominator))
        };

        // the reduced fraction leads the product
        Some((fraction * SymExpr::Mul(new_factors)).downgrade())
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// A power that other factors of the product are being merged into.
struct LikeFactors<'a> {
    base: SymExpr,
    exp: SymExpr,

    /// The first factor of the group, used as is when nothing else joins it.
    first: &'a SymExpr,
    merged: bool,
}

impl<'a> LikeFactors<'a> {
    fn new(factor: &'a SymExpr) -> Self {
        let (base, exp) = match factor {
            SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
            other => (other.clone(), SymExpr::integer(1)),
        };
        Self { base, exp, first: factor, merged: false }
    }

    /// Merges `other` into the group if the two share an exponent and have numeric bases of the
    /// same kind (`2^c*3^c = 6^c`), or share a base (`a^b*a^c = a^(b+c)`).
    fn try_merge(&mut self, other: &LikeFactors) -> bool {
        let numeric_bases = matches!(
            (&self.base, &other.base),
            (SymExpr::Primary(Primary::Integer(_)), SymExpr::Primary(Primary::Integer(_)))
                | (SymExpr::Primary(Primary::Float(_)), SymExpr::Primary(Primary::Float(_)))
        );
        if numeric_bases && self.exp == other.exp {
            self.base = self.base.clone() * other.base.clone();
        } else if self.base == other.base {
            self.exp = self.exp.clone() + other.exp.clone();
        } else {
            return false;
        }
        self.merged = true;
        true
    }

    fn into_factor(self) -> SymExpr {
        if !self.merged {
            self.first.clone()
        } else if self.exp.as_integer().is_some_and(|n| *n == 1) {
            self.base
        } else {
            SymExpr::pow(self.base, self.exp)
        }
    }
}

/// Merges powers of the same base, and numeric powers with the same exponent.
///
/// `x^2 * x = x^3`, `2^x * 3^x = 6^x`
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut groups: Vec<LikeFactors> = Vec::with_capacity(factors.len());
        for factor in factors {
            let next = LikeFactors::new(factor);
            if !groups.iter_mut().any(|group| group.try_merge(&next)) {
                groups.push(next);
            }
        }

        if groups.len() == factors.len() {
            return None;
        }
        let new_factors = groups.into_iter().map(LikeFactors::into_factor).collect();
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers_together(expr, step_collector))
        .or_else(|| reduce_numerical_fraction(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
