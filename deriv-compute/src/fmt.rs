//! LaTeX typesetting of expressions.
//!
//! Any [`SymExpr`] can be typeset; formatting never fails. The output is meant to be read, not
//! parsed again: products are joined with a thin space, negative powers become fractions, and
//! half powers become square roots.

use crate::{funcs::{Func, NamedConst}, symbolic::expr::{Primary, SymExpr}};
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// If the expression is negative on its face (a negative number, or a product led by one),
/// returns the expression with the sign removed.
fn split_sign(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) if *n < 0 => {
            Some(SymExpr::Primary(Primary::Integer(-n.clone())))
        },
        SymExpr::Primary(Primary::Float(n)) if *n < 0 => {
            Some(SymExpr::Primary(Primary::Float(-n.clone())))
        },
        SymExpr::Mul(factors) => {
            let (first, rest) = factors.split_first()?;
            if !first.is_number() {
                return None;
            }
            let magnitude = split_sign(first)?;

            // `-1 * a` is written `-a`
            let mut factors = Vec::with_capacity(factors.len());
            if rest.is_empty() || !magnitude.as_integer().is_some_and(|n| *n == 1) {
                factors.push(magnitude);
            }
            factors.extend_from_slice(rest);
            Some(SymExpr::Mul(factors).downgrade())
        },
        _ => None,
    }
}

/// Returns true if the exponent is one half.
fn is_half(exp: &SymExpr) -> bool {
    match exp {
        SymExpr::Primary(Primary::Float(n)) => *n == 0.5,
        SymExpr::Exp(base, exp) => base.as_integer().is_some_and(|n| *n == 2) && exp.is_neg_one(),
        SymExpr::Mul(factors) => match factors.as_slice() {
            [one, half] => one.as_integer().is_some_and(|n| *n == 1) && is_half(half),
            [half] => is_half(half),
            _ => false,
        },
        _ => false,
    }
}

/// Writes `expr` wrapped in `\left(` and `\right)`.
fn fmt_paren(f: &mut Formatter, expr: &SymExpr) -> Result {
    write!(f, "\\left(")?;
    expr.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// Helper to format powers with a non-negative exponent.
fn fmt_pow(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> Result {
    if is_half(exp) {
        write!(f, "\\sqrt{{")?;
        base.fmt_latex(f)?;
        return write!(f, "}}");
    }

    match base {
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..)
            | SymExpr::Primary(Primary::Call(Func::Exp, _)) => fmt_paren(f, base)?,
        base if split_sign(base).is_some() || base.is_float() => fmt_paren(f, base)?,
        base => base.fmt_latex(f)?,
    }
    write!(f, "^{{")?;
    exp.fmt_latex(f)?;
    write!(f, "}}")
}

/// Writes the factors of a product separated by thin spaces.
fn fmt_factors(f: &mut Formatter, factors: &[SymExpr]) -> Result {
    if let [single] = factors {
        return single.fmt_latex(f);
    }

    for (idx, factor) in factors.iter().enumerate() {
        if idx > 0 {
            write!(f, "\\,")?;
        }
        match factor {
            SymExpr::Add(_) => fmt_paren(f, factor)?,
            factor if idx > 0 && split_sign(factor).is_some() => fmt_paren(f, factor)?,
            factor => factor.fmt_latex(f)?,
        }
    }
    Ok(())
}

/// Writes a product, moving factors with a negative exponent into the denominator of a fraction.
fn fmt_product(f: &mut Formatter, factors: &[SymExpr]) -> Result {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        if let SymExpr::Exp(base, exp) = factor {
            if let Some(exp) = split_sign(exp) {
                if exp.as_integer().is_some_and(|n| *n == 1) {
                    denominator.push((**base).clone());
                } else {
                    denominator.push(SymExpr::pow((**base).clone(), exp));
                }
                continue;
            }
        }
        numerator.push(factor.clone());
    }

    if denominator.is_empty() {
        return fmt_factors(f, &numerator);
    }

    write!(f, "\\frac{{")?;
    if numerator.is_empty() {
        write!(f, "1")?;
    } else {
        fmt_factors(f, &numerator)?;
    }
    write!(f, "}}{{")?;
    fmt_factors(f, &denominator)?;
    write!(f, "}}")
}

/// Writes a sum, turning `a + (-b)` into `a - b`.
fn fmt_sum(f: &mut Formatter, terms: &[SymExpr]) -> Result {
    for (idx, term) in terms.iter().enumerate() {
        let (sign, term) = match split_sign(term) {
            Some(magnitude) => (if idx == 0 { "-" } else { " - " }, magnitude),
            None => (if idx == 0 { "" } else { " + " }, term.clone()),
        };
        write!(f, "{}", sign)?;
        match term {
            SymExpr::Add(_) => fmt_paren(f, &term)?,
            term => term.fmt_latex(f)?,
        }
    }
    Ok(())
}

impl Latex for Func {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        let name = match self {
            Func::Sin => "\\sin",
            Func::Cos => "\\cos",
            Func::Tan => "\\tan",
            Func::Cot => "\\cot",
            Func::Sec => "\\sec",
            Func::Csc => "\\csc",
            Func::Asin => "\\arcsin",
            Func::Acos => "\\arccos",
            Func::Atan => "\\arctan",
            Func::Sinh => "\\sinh",
            Func::Cosh => "\\cosh",
            Func::Tanh => "\\tanh",
            Func::Exp => "\\exp",
            Func::Ln => "\\ln",
            Func::Abs => "\\operatorname{abs}",
            Func::Sign => "\\operatorname{sgn}",
            Func::Floor => "\\operatorname{floor}",
            Func::Ceil => "\\operatorname{ceil}",
        };
        write!(f, "{}", name)
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Primary::Integer(n) => write!(f, "{}", n),
            Primary::Float(n) => write!(f, "{}", n.to_f64()),
            Primary::Named(NamedConst::Pi) => write!(f, "\\pi"),
            Primary::Named(NamedConst::E) => write!(f, "e"),
            Primary::Symbol(name) if name.chars().count() > 1 => write!(f, "\\mathrm{{{}}}", name),
            Primary::Symbol(name) => write!(f, "{}", name),
            Primary::Call(Func::Exp, arg) => {
                write!(f, "e^{{")?;
                arg.fmt_latex(f)?;
                write!(f, "}}")
            },
            Primary::Call(Func::Abs, arg) => {
                write!(f, "\\left|")?;
                arg.fmt_latex(f)?;
                write!(f, "\\right|")
            },
            Primary::Call(Func::Floor, arg) => {
                write!(f, "\\left\\lfloor ")?;
                arg.fmt_latex(f)?;
                write!(f, "\\right\\rfloor")
            },
            Primary::Call(Func::Ceil, arg) => {
                write!(f, "\\left\\lceil ")?;
                arg.fmt_latex(f)?;
                write!(f, "\\right\\rceil")
            },
            Primary::Call(func, arg) => {
                func.fmt_latex(f)?;
                fmt_paren(f, arg)
            },
        }
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            SymExpr::Primary(primary) => primary.fmt_latex(f),
            SymExpr::Add(terms) => fmt_sum(f, terms),
            SymExpr::Mul(factors) => match split_sign(self) {
                Some(magnitude) => {
                    write!(f, "-")?;
                    match magnitude {
                        SymExpr::Add(_) => fmt_paren(f, &magnitude),
                        SymExpr::Mul(factors) => fmt_product(f, &factors),
                        magnitude => magnitude.fmt_latex(f),
                    }
                },
                None => fmt_product(f, factors),
            },
            SymExpr::Exp(base, exp) => {
                if split_sign(exp).is_some() {
                    fmt_product(f, std::slice::from_ref(self))
                } else {
                    fmt_pow(f, base, exp)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::lower::lower;
    use deriv_parser::parser::{expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(input: &str) -> String {
        let ast = Parser::new(input).try_parse_full::<Expr>().unwrap();
        lower(&ast, "x").unwrap().as_display().to_string()
    }

    #[test]
    fn zero_and_one() {
        assert_eq!(SymExpr::integer(0).as_display().to_string(), "0");
        assert_eq!(SymExpr::integer(1).as_display().to_string(), "1");
    }

    #[test]
    fn polynomial() {
        assert_eq!(latex("x^2 + 3x - 1"), "x^{2} + 3\\,x - 1");
        assert_eq!(latex("-x^2"), "-x^{2}");
        assert_eq!(latex("(x + 1)^2"), "\\left(x + 1\\right)^{2}");
    }

    #[test]
    fn fractions() {
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("x - 1/x"), "x - \\frac{1}{x}");
        assert_eq!(latex("(x + 1)/(x - 1)"), "\\frac{x + 1}{x - 1}");
        assert_eq!(latex("x^-2"), "\\frac{1}{x^{2}}");
    }

    #[test]
    fn roots() {
        assert_eq!(latex("sqrt(x + 1)"), "\\sqrt{x + 1}");
        assert_eq!(latex("x^(-1/2)"), "\\frac{1}{\\sqrt{x}}");
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(latex("-sin(x)"), "-\\sin\\left(x\\right)");
        assert_eq!(latex("exp(2x)"), "e^{2\\,x}");
        assert_eq!(latex("pi x^2"), "\\pi\\,x^{2}");
        assert_eq!(latex("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex("ln(x) cos(x)^2"), "\\ln\\left(x\\right)\\,\\cos\\left(x\\right)^{2}");
        assert_eq!(latex("0.5x"), "0.5\\,x");
    }
}
