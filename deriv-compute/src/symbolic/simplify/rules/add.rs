//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{fraction::{extract_explicit_frac, make_fraction}, rules::{add_numbers, do_add, fold_numbers}, step::Step},
    step_collector::StepCollector,
};

/// Adds two coefficients, keeping the result as an exact fraction when both are rational.
fn add_coefficients(lhs: SymExpr, rhs: SymExpr) -> SymExpr {
    if lhs.is_float() || rhs.is_float() {
        if let Some(sum) = add_numbers(&lhs, &rhs) {
            return sum;
        }
    }

    match (extract_explicit_frac(&mut lhs.clone()), extract_explicit_frac(&mut rhs.clone())) {
        (Some((num1, den1)), Some((num2, den2))) => {
            // (a / b) + (c / d) = (a*d + b*c) / (b*d)
            let numerator = num1 * &den2 + num2 * &den1;
            let denominator = den1 * den2;
            if denominator == 1 {
                SymExpr::integer(numerator)
            } else {
                make_fraction(SymExpr::integer(numerator), SymExpr::integer(denominator))
            }
        },
        _ => lhs + rhs,
    }
}

/// Splits a term into its numeric coefficient and the rest of the term.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
fn get_coeff(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        expr if expr.is_number() || expr.is_integer_recip() => (expr.clone(), SymExpr::integer(1)),
        SymExpr::Mul(factors) => {
            let mut rest = factors.clone();
            let numerator_idx = rest.iter().position(SymExpr::is_number);
            let numerator = numerator_idx.map(|idx| rest.remove(idx));
            let denominator_idx = rest.iter().position(SymExpr::is_integer_recip);
            let denominator = denominator_idx.map(|idx| rest.remove(idx));

            let coeff = match (numerator, denominator) {
                (Some(numerator), Some(denominator)) => numerator * denominator,
                (Some(coeff), None) | (None, Some(coeff)) => coeff,
                (None, None) => SymExpr::integer(1),
            };
            (coeff, SymExpr::Mul(rest).downgrade())
        },
        _ => (SymExpr::integer(1), expr.clone()),
    }
}

/// `0+a = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut kept = terms.to_vec();
        kept.retain(|term| match term {
            SymExpr::Primary(Primary::Integer(n)) => !n.is_zero(),
            SymExpr::Primary(Primary::Float(n)) => !n.is_zero(),
            _ => true,
        });
        (kept.len() < terms.len()).then(|| SymExpr::Add(kept).downgrade())
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2+a+3 = 5+a`
pub fn add_numbers_together(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        fold_numbers(terms, add_numbers).map(|terms| SymExpr::Add(terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// A set of like terms being merged.
struct LikeTerms<'a> {
    /// The term without its coefficient.
    rest: SymExpr,
    coeff: SymExpr,

    /// The first term of the group, used as is when nothing else joins it.
    first: &'a SymExpr,
    merged: bool,
}

impl LikeTerms<'_> {
    fn into_term(self) -> SymExpr {
        if !self.merged {
            self.first.clone()
        } else if self.rest.as_integer().is_some_and(|n| *n == 1) {
            self.coeff
        } else if self.coeff.as_integer().is_some_and(|n| *n == 1) {
            self.rest
        } else {
            self.coeff * self.rest
        }
    }
}

/// Merges terms that differ only in their numeric coefficient, keeping each group where its
/// first member was.
///
/// `x + 2x = 3x`, `sin(x)/2 + sin(x)/2 = sin(x)`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut groups: Vec<LikeTerms> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = get_coeff(term);
            match groups.iter_mut().find(|group| group.rest == rest) {
                Some(group) => {
                    group.coeff = add_coefficients(group.coeff.clone(), coeff);
                    group.merged = true;
                },
                None => groups.push(LikeTerms { rest, coeff, first: term, merged: false }),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }
        let new_terms = groups.into_iter().map(LikeTerms::into_term).collect();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| add_numbers_together(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn coefficients_add() {
        // 2x + x + 3x = 6x
        let expr = SymExpr::Add(vec![
            SymExpr::integer(2) * x(),
            x(),
            SymExpr::integer(3) * x(),
        ]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::integer(6), x()])),
        );
    }

    #[test]
    fn opposite_terms_cancel() {
        // x - x = 0x
        let expr = SymExpr::Add(vec![x(), -x()]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::integer(0), x()])),
        );
    }

    #[test]
    fn unrelated_terms() {
        let expr = SymExpr::Add(vec![x(), SymExpr::pow(x(), SymExpr::integer(2))]);
        assert_eq!(combine_like_terms(&expr, &mut ()), None);
    }

    #[test]
    fn zero_terms() {
        let expr = SymExpr::Add(vec![SymExpr::integer(0), x()]);
        let mut steps = Vec::new();
        assert_eq!(add_zero(&expr, &mut steps), Some(x()));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
