//! The named functions and constants that can appear in a formula.
//!
//! Every function is unary. Functions are identified by the [`Func`] enumeration rather than by
//! name, so that the derivative table, the typesetter, and the numerical evaluator are each a
//! single exhaustive `match`.

use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::{collections::HashMap, f64::consts};

/// Below this magnitude, the cosine or sine in the denominator of `tan`, `sec`, `cot`, or `csc`
/// is treated as zero, and the function is undefined at that point.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

/// A unary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Abs,
    Sign,
    Floor,
    Ceil,
}

/// Lookup table from every accepted spelling to its function.
static FUNCTIONS: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    let mut map = Func::ALL.iter()
        .map(|&func| (func.name(), func))
        .collect::<HashMap<_, _>>();
    map.insert("log", Func::Ln);
    map.insert("arcsin", Func::Asin);
    map.insert("arccos", Func::Acos);
    map.insert("arctan", Func::Atan);
    map
});

impl Func {
    /// Every supported function.
    pub const ALL: [Func; 18] = [
        Func::Sin, Func::Cos, Func::Tan, Func::Cot, Func::Sec, Func::Csc,
        Func::Asin, Func::Acos, Func::Atan,
        Func::Sinh, Func::Cosh, Func::Tanh,
        Func::Exp, Func::Ln,
        Func::Abs, Func::Sign, Func::Floor, Func::Ceil,
    ];

    /// Returns the function with the given name, accepting aliases such as `log` for [`Func::Ln`].
    pub fn from_name(name: &str) -> Option<Self> {
        FUNCTIONS.get(name).copied()
    }

    /// Returns the canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Cot => "cot",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    /// Returns true if the function is one of the six circular trigonometric functions.
    pub fn is_trigonometric(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan | Self::Cot | Self::Sec | Self::Csc)
    }

    /// Evaluates the function at `x`. Returns NaN where the function is undefined.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => reciprocal(x.cos()) * x.sin(),
            Self::Cot => reciprocal(x.sin()) * x.cos(),
            Self::Sec => reciprocal(x.cos()),
            Self::Csc => reciprocal(x.sin()),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Exp => x.exp(),
            Self::Ln if x > 0.0 => x.ln(),
            Self::Ln => f64::NAN,
            Self::Abs => x.abs(),
            Self::Sign if x == 0.0 => 0.0,
            Self::Sign => x.signum(),
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
        }
    }
}

/// `1 / x`, or NaN if `x` is within [`SINGULARITY_EPSILON`] of zero.
fn reciprocal(x: f64) -> f64 {
    if x.abs() < SINGULARITY_EPSILON {
        f64::NAN
    } else {
        x.recip()
    }
}

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedConst {
    /// The ratio of a circle's circumference to its diameter, written `pi`.
    Pi,

    /// Euler's number, the base of the natural logarithm, written `e`.
    E,
}

impl NamedConst {
    /// Every supported constant.
    pub const ALL: [NamedConst; 2] = [NamedConst::Pi, NamedConst::E];

    /// Returns the constant with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    /// Returns the name of the constant as written in a formula.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Returns the value of the constant.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }
}

/// Returns the known names (functions, constants, and the given variable) that are within one
/// edit of `name`.
pub fn similar_names(name: &str, variable: &str) -> Vec<String> {
    let mut names = FUNCTIONS.keys()
        .copied()
        .chain(NamedConst::ALL.iter().map(|c| c.name()))
        .chain(["sqrt", variable])
        .filter(|candidate| *candidate != name && levenshtein(candidate, name) < 2)
        .map(str::to_string)
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_is_relative_eq, afe_relative_error_msg, afe_abs, assert_float_relative_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn names_round_trip() {
        for func in Func::ALL {
            assert_eq!(Func::from_name(func.name()), Some(func));
        }
        assert_eq!(Func::from_name("log"), Some(Func::Ln));
        assert_eq!(Func::from_name("arctan"), Some(Func::Atan));
        assert_eq!(Func::from_name("foo"), None);
    }

    #[test]
    fn singularities() {
        assert!(Func::Tan.eval(consts::FRAC_PI_2).is_nan());
        assert!(Func::Sec.eval(-consts::FRAC_PI_2).is_nan());
        assert!(Func::Cot.eval(0.0).is_nan());
        assert!(Func::Ln.eval(0.0).is_nan());
        assert!(Func::Ln.eval(-1.0).is_nan());
        assert!(Func::Asin.eval(2.0).is_nan());
    }

    #[test]
    fn regular_values() {
        assert_float_relative_eq!(Func::Tan.eval(1.0), 1.0f64.tan(), 1e-12);
        assert_float_relative_eq!(Func::Csc.eval(1.0), 1.0 / 1.0f64.sin(), 1e-12);
        assert_float_relative_eq!(Func::Ln.eval(consts::E), 1.0, 1e-12);
    }

    #[test]
    fn suggestions() {
        assert_eq!(similar_names("sinn", "x"), vec!["sign", "sin", "sinh"]);
        assert_eq!(similar_names("y", "x"), vec!["e", "x"]);
        assert!(similar_names("foo", "x").is_empty());
    }
}
