//! Numerical evaluation of expressions with `f64` arithmetic.
//!
//! Evaluation never fails. Points where an expression is undefined, such as `1/x` at `x = 0` or
//! `ln(x)` for negative `x`, evaluate to a non-finite value (`NaN` or an infinity), which
//! propagates through the rest of the expression the way IEEE 754 arithmetic does.

pub mod eval;
pub mod sample;

pub use sample::{sample, Domain, Sample};
