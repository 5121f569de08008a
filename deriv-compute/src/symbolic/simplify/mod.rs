//! Simplification of expressions.
//!
//! The simplifier works bottom-up. The children of a node are simplified first, then the node is
//! rebuilt (flattening any sum nested in a sum, or product nested in a product), and finally the
//! rules in [`rules`] are applied to the node until none of them match. A rule only ever looks at
//! a single node, so a rule that produces new children has them simplified on the next pass.
//!
//! The result is smaller than the input, but not canonical: two equivalent expressions can
//! simplify to different trees.

pub mod fraction;
pub mod rules;
pub mod step;

use log::{trace, warn};
use super::{expr::{Primary, SymExpr}, step_collector::StepCollector};
use step::Step;

/// Upper bound on the number of rule applications at a single node. Every rule makes the node
/// smaller, so this is only reached if two rules undo each other.
const MAX_PASSES: usize = 256;

/// Simplifies the children of the expression, then rebuilds it, flattening nested sums and
/// products.
fn simplify_children(
    expr: SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(func, arg)) => {
            SymExpr::call(func, inner_simplify(*arg, step_collector))
        },
        SymExpr::Primary(_) => expr,
        SymExpr::Add(terms) => terms.into_iter()
            .map(|term| inner_simplify(term, step_collector))
            .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term)
            .downgrade(),
        SymExpr::Mul(factors) => factors.into_iter()
            .map(|factor| inner_simplify(factor, step_collector))
            .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor)
            .downgrade(),
        SymExpr::Exp(base, exponent) => SymExpr::pow(
            inner_simplify(*base, step_collector),
            inner_simplify(*exponent, step_collector),
        ),
    }
}

fn inner_simplify(
    expr: SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut expr = simplify_children(expr, step_collector);

    for _ in 0..MAX_PASSES {
        match rules::all(&expr, step_collector) {
            Some(next) => {
                trace!("{} => {}", expr, next);
                expr = simplify_children(next, step_collector);
            },
            None => return expr,
        }
    }

    warn!("simplification of `{}` did not settle after {} passes", expr, MAX_PASSES);
    expr
}

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    inner_simplify(expr.clone(), &mut ())
}

/// Simplifies the given expression, returning the simplified expression and the rules that were
/// applied, in order.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = inner_simplify(expr.clone(), &mut steps);
    (simplified, steps)
}

#[cfg(test)]
mod tests {
    use crate::funcs::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn combine_like_terms() {
        // x + x + x = 3x
        let expr = SymExpr::Add(vec![x(), x(), x()]);
        assert_eq!(simplify(&expr), SymExpr::Mul(vec![SymExpr::integer(3), x()]));
    }

    #[test]
    fn fold_numbers_and_powers() {
        // 5 * x^(5 - 1) * 1 = 5x^4
        let expr = SymExpr::Mul(vec![
            SymExpr::integer(5),
            SymExpr::pow(x(), SymExpr::Add(vec![SymExpr::integer(5), SymExpr::integer(-1)])),
            SymExpr::integer(1),
        ]);
        assert_eq!(
            simplify(&expr),
            SymExpr::Mul(vec![SymExpr::integer(5), SymExpr::pow(x(), SymExpr::integer(4))]),
        );
    }

    #[test]
    fn cancel_reciprocal() {
        // x * x^-1 = 1
        let expr = x() * x().recip();
        assert_eq!(simplify(&expr), SymExpr::integer(1));
    }

    #[test]
    fn power_of_power() {
        // (x^2)^3 = x^6
        let expr = SymExpr::pow(SymExpr::pow(x(), SymExpr::integer(2)), SymExpr::integer(3));
        assert_eq!(simplify(&expr), SymExpr::pow(x(), SymExpr::integer(6)));
    }

    #[test]
    fn simplifies_inside_calls() {
        // sin(0 + 2x * 1) = sin(2x)
        let expr = SymExpr::call(Func::Sin, SymExpr::Add(vec![
            SymExpr::integer(0),
            SymExpr::Mul(vec![SymExpr::integer(2), x(), SymExpr::integer(1)]),
        ]));
        assert_eq!(
            simplify(&expr),
            SymExpr::call(Func::Sin, SymExpr::Mul(vec![SymExpr::integer(2), x()])),
        );
    }

    #[test]
    fn rational_exponent() {
        // x^(1/2 - 1) = x^(-1/2)
        let half = SymExpr::integer(1) * SymExpr::integer(2).recip();
        let expr = SymExpr::pow(x(), SymExpr::Add(vec![half, SymExpr::integer(-1)]));
        let (simplified, steps) = simplify_with_steps(&expr);
        assert_eq!(
            simplified,
            SymExpr::pow(x(), SymExpr::Mul(vec![SymExpr::integer(-1), SymExpr::integer(2).recip()])),
        );
        assert!(steps.contains(&Step::CombineLikeTerms));
    }
}
