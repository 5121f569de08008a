//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](deriv_parser::parser::expr::Expr) type from `deriv_parser` is a recursive `enum`
//! that represents the AST of a formula. It's convenient for parsing, but not so much for
//! algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], which flattens the AST into lists of terms and
//! factors and normalizes the remaining operators:
//!
//! - `a - b` becomes `a + (-1)b`
//! - `a / b` becomes `a * b^-1`
//! - `sqrt(a)` becomes `a^(1/2)`
//!
//! Terms and factors are kept in the order they were written, which only matters for how the
//! expression is printed.
//!
//! # Equality
//!
//! [`PartialEq`] compares structure, treating the children of a sum or product as a multiset:
//! `x + 2` equals `2 + x`, but `x + x` does not equal `2x`. Equal expressions always denote the
//! same function; the converse does not hold. The simplifier relies on this to collect like
//! terms without ever merging two terms that merely look alike.

pub mod lower;

use crate::{funcs::{Func, NamedConst}, primitive::int};
use rug::{Float, Integer};
use std::{fmt, ops::{Add, Mul, Neg}};

/// A single term / factor, such as a number, the variable, or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A named constant, such as `pi`.
    Named(NamedConst),

    /// A variable, such as `x`.
    Symbol(String),

    /// A unary function applied to an argument, such as `sin(x)`.
    Call(Func, Box<SymExpr>),
}

/// Floats are compared by value. Float literals are always finite, so `NaN` never reaches
/// this type.
impl Eq for Primary {}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Named(named) => write!(f, "{}", named.name()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

/// Folds two numbers of the same kind with `op`, or returns both operands back.
fn fold_numbers(
    lhs: Primary,
    rhs: Primary,
    int_op: fn(Integer, Integer) -> Integer,
    float_op: fn(Float, Float) -> Float,
) -> Result<Primary, (Primary, Primary)> {
    match (lhs, rhs) {
        (Primary::Integer(a), Primary::Integer(b)) => Ok(Primary::Integer(int_op(a, b))),
        (Primary::Float(a), Primary::Float(b)) => Ok(Primary::Float(float_op(a, b))),
        operands => Err(operands),
    }
}

/// Numbers of the same kind are summed; anything else becomes a two-term [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match fold_numbers(self, rhs, |a, b| a + b, |a, b| a + b) {
            Ok(sum) => SymExpr::Primary(sum),
            Err((lhs, rhs)) => SymExpr::Add(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// Numbers of the same kind are multiplied; anything else becomes a two-factor [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match fold_numbers(self, rhs, |a, b| a * b, |a, b| a * b) {
            Ok(product) => SymExpr::Primary(product),
            Err((lhs, rhs)) => SymExpr::Mul(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// A formula in normal form: sums and products are flat lists, differences are sums with a
/// negated term, quotients are products with a reciprocal, and roots are fractional powers.
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an [`SymExpr::Primary`] containing the given integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates an [`SymExpr::Primary`] containing the given variable.
    pub fn symbol(name: &str) -> Self {
        Self::Primary(Primary::Symbol(name.to_string()))
    }

    /// Creates a call of the given function with the given argument.
    pub fn call(func: Func, arg: SymExpr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Creates `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates `1 / self`, represented as `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        Self::pow(self, Self::integer(-1))
    }

    /// Returns the square root of this expression, represented as `self^(1/2)`. No simplification
    /// is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::integer(1) * Self::integer(2).recip())
    }

    /// Returns the binding strength of the expression when printed, from loosest to tightest.
    fn level(&self) -> u8 {
        match self {
            Self::Add(_) => 1,
            Self::Mul(_) => 2,
            Self::Primary(Primary::Integer(n)) if *n < 0 => 2,
            Self::Primary(Primary::Float(n)) if *n < 0 => 2,
            Self::Exp(..) => 3,
            Self::Primary(_) => 4,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Returns true if the expression is a plain number: a [`Primary::Integer`] or a
    /// [`Primary::Float`].
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of `-1`.
    pub fn is_integer_recip(&self) -> bool {
        self.as_recip().is_some_and(SymExpr::is_integer)
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of `-1`, returns the
    /// integer.
    pub fn into_integer_recip(self) -> Option<Integer> {
        match self {
            Self::Exp(base, exp) if exp.is_neg_one() => base.into_integer(),
            _ => None,
        }
    }

    /// Returns true if the expression is the integer `-1`.
    pub fn is_neg_one(&self) -> bool {
        self.as_integer().is_some_and(|n| *n == -1)
    }

    /// If the expression is some expression raised to the power of `-1`, returns that expression
    /// (the denominator of the fraction).
    pub fn as_recip(&self) -> Option<&SymExpr> {
        match self {
            Self::Exp(base, exp) if exp.is_neg_one() => Some(base),
            _ => None,
        }
    }

    /// Returns true if the variable with the given name does not occur anywhere in the expression.
    pub fn is_free_of(&self, var: &str) -> bool {
        match self {
            Self::Primary(Primary::Symbol(sym)) => sym != var,
            Self::Primary(Primary::Call(_, arg)) => arg.is_free_of(var),
            Self::Primary(_) => true,
            Self::Add(children) | Self::Mul(children) => children.iter().all(|child| child.is_free_of(var)),
            Self::Exp(base, exp) => base.is_free_of(var) && exp.is_free_of(var),
        }
    }

    /// Collapses sums and products with fewer than two children: an empty sum is `0`, an empty
    /// product is `1`, and a single child stands for itself.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(terms) if terms.is_empty() => Self::integer(0),
            Self::Mul(factors) if factors.is_empty() => Self::integer(1),
            Self::Add(mut children) | Self::Mul(mut children) if children.len() == 1 => {
                children.swap_remove(0)
            },
            other => other,
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Writes `expr`, wrapped in parentheses if it binds no tighter than `min_level`.
        fn write_operand(f: &mut fmt::Formatter<'_>, expr: &SymExpr, min_level: u8) -> fmt::Result {
            if expr.level() <= min_level {
                write!(f, "({})", expr)
            } else {
                write!(f, "{}", expr)
            }
        }

        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    write_operand(f, factor, 1)?;
                    for factor in iter {
                        write!(f, " * ")?;
                        write_operand(f, factor, 2)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                write_operand(f, base, 3)?;
                write!(f, "^")?;
                write_operand(f, exp, 2)
            },
        }
    }
}

/// Structural equality, ignoring the order of terms and factors. See the
/// [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
                    && rhs.iter().all(|rhs| lhs.contains(rhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Joins two operands into one list of children, splicing in the children of an operand that is
/// already a node of the same kind. Order is kept.
fn join(lhs: SymExpr, rhs: SymExpr, unwrap: fn(SymExpr) -> Result<Vec<SymExpr>, SymExpr>) -> Vec<SymExpr> {
    let mut children = unwrap(lhs).unwrap_or_else(|lhs| vec![lhs]);
    match unwrap(rhs) {
        Ok(rest) => children.extend(rest),
        Err(rhs) => children.push(rhs),
    }
    children
}

/// Flattening addition. Two numbers of the same kind are summed; nothing else is simplified.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (lhs, rhs) => Self::Add(join(lhs, rhs, |expr| match expr {
                Self::Add(terms) => Ok(terms),
                other => Err(other),
            })),
        }
    }
}

/// Flattening multiplication. Two numbers of the same kind are multiplied; nothing else is
/// simplified.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (lhs, rhs) => Self::Mul(join(lhs, rhs, |expr| match expr {
                Self::Mul(factors) => Ok(factors),
                other => Err(other),
            })),
        }
    }
}

/// Negates numbers directly; anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::integer(-1) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn strict_equality_ignores_order() {
        let a = SymExpr::Add(vec![x(), SymExpr::integer(2), SymExpr::call(Func::Sin, x())]);
        let b = SymExpr::Add(vec![SymExpr::call(Func::Sin, x()), x(), SymExpr::integer(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_counts_terms() {
        let a = SymExpr::Add(vec![x(), x(), SymExpr::integer(2)]);
        let b = SymExpr::Add(vec![x(), SymExpr::integer(2), SymExpr::integer(2)]);
        assert_ne!(a, b);
    }

    #[test]
    fn operators_flatten_in_order() {
        let sum = (x() + SymExpr::integer(1)) + (SymExpr::integer(2) + x());
        let SymExpr::Add(terms) = &sum else {
            panic!("expected a sum, got {}", sum);
        };
        assert_eq!(terms.len(), 4);
        assert_eq!(sum.to_string(), "x + 1 + 2 + x");

        let product = SymExpr::integer(3) * (x() * SymExpr::call(Func::Cos, x()));
        assert_eq!(product.to_string(), "3 * x * cos(x)");
    }

    #[test]
    fn numbers_fold() {
        assert_eq!(SymExpr::integer(2) + SymExpr::integer(3), SymExpr::integer(5));
        assert_eq!(SymExpr::integer(2) * SymExpr::integer(3), SymExpr::integer(6));
        assert_eq!(-SymExpr::integer(4), SymExpr::integer(-4));
        assert_eq!(-x(), SymExpr::Mul(vec![SymExpr::integer(-1), x()]));
    }

    #[test]
    fn free_of_variable() {
        let expr = SymExpr::pow(SymExpr::integer(2), SymExpr::call(Func::Sin, x()));
        assert!(!expr.is_free_of("x"));
        assert!(expr.is_free_of("y"));
        assert!(SymExpr::Primary(Primary::Named(NamedConst::Pi)).is_free_of("x"));
    }

    #[test]
    fn display_parenthesizes() {
        let expr = SymExpr::pow(x() + SymExpr::integer(1), SymExpr::integer(2))
            * SymExpr::pow(x(), SymExpr::integer(-1));
        assert_eq!(expr.to_string(), "(x + 1)^2 * x^(-1)");
    }
}
