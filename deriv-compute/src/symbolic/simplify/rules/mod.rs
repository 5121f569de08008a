//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply.

pub mod add;
pub mod multiply;
pub mod power;

use crate::{primitive::float, symbolic::step_collector::StepCollector};
use rug::Float;
use super::{step::Step, Primary, SymExpr};

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the left
/// and right-hand-side of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Copy + Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Returns the value of a [`Primary::Integer`] or [`Primary::Float`] as a [`Float`].
fn to_float(expr: &SymExpr) -> Option<Float> {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => Some(float(n)),
        SymExpr::Primary(Primary::Float(n)) => Some(n.clone()),
        _ => None,
    }
}

/// Adds two numbers. The sum of two integers is an integer; any other sum is a float.
pub(crate) fn add_numbers(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    match (lhs, rhs) {
        (SymExpr::Primary(Primary::Integer(a)), SymExpr::Primary(Primary::Integer(b))) => {
            Some(SymExpr::Primary(Primary::Integer(a.clone() + b)))
        },
        _ => Some(SymExpr::Primary(Primary::Float(to_float(lhs)? + to_float(rhs)?))),
    }
}

/// Multiplies two numbers. The product of two integers is an integer; any other product is a
/// float.
pub(crate) fn multiply_numbers(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    match (lhs, rhs) {
        (SymExpr::Primary(Primary::Integer(a)), SymExpr::Primary(Primary::Integer(b))) => {
            Some(SymExpr::Primary(Primary::Integer(a.clone() * b)))
        },
        _ => Some(SymExpr::Primary(Primary::Float(to_float(lhs)? * to_float(rhs)?))),
    }
}

/// Folds every number in the list into the first number, keeping the order of everything else.
/// Returns [`None`] if there are fewer than two numbers.
pub(crate) fn fold_numbers(
    items: &[SymExpr],
    op: fn(&SymExpr, &SymExpr) -> Option<SymExpr>,
) -> Option<Vec<SymExpr>> {
    if items.iter().filter(|item| item.is_number()).count() < 2 {
        return None;
    }

    let mut folded: Vec<SymExpr> = Vec::with_capacity(items.len());
    let mut number_idx = None;
    for item in items {
        match number_idx {
            Some(idx) if item.is_number() => {
                folded[idx] = op(&folded[idx], item)?;
            },
            None if item.is_number() => {
                number_idx = Some(folded.len());
                folded.push(item.clone());
            },
            _ => folded.push(item.clone()),
        }
    }
    Some(folded)
}

/// Applies all rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fold_keeps_order() {
        let items = vec![
            SymExpr::symbol("x"),
            SymExpr::integer(2),
            SymExpr::symbol("y"),
            SymExpr::integer(3),
        ];
        assert_eq!(
            fold_numbers(&items, add_numbers),
            Some(vec![SymExpr::symbol("x"), SymExpr::integer(5), SymExpr::symbol("y")]),
        );
    }

    #[test]
    fn mixed_numbers_become_floats() {
        let product = multiply_numbers(&SymExpr::integer(2), &SymExpr::Primary(Primary::Float(float(1.5))));
        assert_eq!(product, Some(SymExpr::Primary(Primary::Float(float(3)))));
    }
}
