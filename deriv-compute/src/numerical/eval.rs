use crate::symbolic::expr::{Primary, SymExpr};

/// Raises `base` to `exp`, using repeated multiplication for small integer exponents.
fn pow(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        base.powi(exp as i32)
    } else {
        base.powf(exp)
    }
}

impl Primary {
    /// Evaluates the primary at `var = x`. Symbols other than `var` evaluate to `NaN`.
    pub fn eval(&self, var: &str, x: f64) -> f64 {
        match self {
            Primary::Integer(n) => n.to_f64(),
            Primary::Float(n) => n.to_f64(),
            Primary::Named(c) => c.value(),
            Primary::Symbol(name) if name == var => x,
            Primary::Symbol(_) => f64::NAN,
            Primary::Call(func, arg) => func.eval(arg.eval(var, x)),
        }
    }
}

impl SymExpr {
    /// Evaluates the expression at `var = x`.
    pub fn eval(&self, var: &str, x: f64) -> f64 {
        match self {
            SymExpr::Primary(primary) => primary.eval(var, x),
            SymExpr::Add(terms) => terms.iter().map(|term| term.eval(var, x)).sum(),
            SymExpr::Mul(factors) => factors.iter().map(|factor| factor.eval(var, x)).product(),
            SymExpr::Exp(base, exp) => pow(base.eval(var, x), exp.eval(var, x)),
        }
    }

    /// Returns a closure that evaluates the expression at the given value of `var`.
    pub fn to_fn<'a>(&'a self, var: &'a str) -> impl Fn(f64) -> f64 + Send + Sync + 'a {
        move |x| self.eval(var, x)
    }
}
