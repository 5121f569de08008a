//! The full pipeline from a formula to its typeset and sampled derivative.

use crate::{
    config::Config,
    error::{kind::NoDerivative, Error},
    fmt::Latex,
    numerical::{sample, Sample},
    symbolic::{
        classify,
        derivative,
        expr::lower::lower,
        simplify_with_steps,
        DerivativeError,
        Rule,
        StepCollector,
        SymExpr,
    },
};
use deriv_parser::parser::{expr::Expr as AstExpr, Parser};
use log::{debug, warn};
use std::fmt;

/// A line of the explanation that accompanies a derivative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Step {
    /// States the function being differentiated.
    Original { variable: String, latex: String },

    /// States the derivative to find.
    FindDerivative { variable: String, latex: String },

    /// Names the rule that applies to the outermost operation of the function.
    Rule(Rule),

    /// States the derivative.
    Result { variable: String, latex: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original { variable, latex } => {
                write!(f, "Original function: $$f({}) = {}$$", variable, latex)
            },
            Self::FindDerivative { variable, latex } => write!(
                f,
                r"Find the derivative: $$\frac{{d}}{{d{}}}\left({}\right)$$",
                variable,
                latex,
            ),
            Self::Rule(rule) => write!(f, "{}", rule),
            Self::Result { variable, latex } => write!(f, "Result: $$f'({}) = {}$$", variable, latex),
        }
    }
}

/// A differentiated formula.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Derivation {
    /// The formula, as lowered from the input.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub original: SymExpr,

    /// The derivative of the formula, simplified if requested.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub derivative: SymExpr,

    /// The formula, typeset as LaTeX.
    pub original_latex: String,

    /// The derivative, typeset as LaTeX.
    pub derivative_latex: String,

    /// The lines of the explanation, in order.
    pub steps: Vec<Step>,

    /// The derivative sampled over the configured domain.
    pub samples: Vec<Sample>,
}

impl Derivation {
    /// Returns the explanation, one step per line.
    pub fn explanation(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the number of samples at which the derivative is undefined.
    pub fn undefined_samples(&self) -> usize {
        self.samples.iter().filter(|s| !s.is_defined()).count()
    }
}

/// Reports the explanation of a derivative to the collector.
fn explain(
    original: &SymExpr,
    variable: &str,
    original_latex: &str,
    derivative_latex: &str,
    step_collector: &mut dyn StepCollector<Step>,
) {
    let variable = variable.to_string();
    step_collector.push(Step::Original { variable: variable.clone(), latex: original_latex.to_string() });
    step_collector.push(Step::FindDerivative { variable: variable.clone(), latex: original_latex.to_string() });
    if let Some(rule) = classify(original) {
        step_collector.push(Step::Rule(rule));
    }
    step_collector.push(Step::Result { variable, latex: derivative_latex.to_string() });
}

/// Converts a failed differentiation into an error that points at the offending function in the
/// input, or at the whole input if the function's name cannot be found in it.
fn unsupported(err: DerivativeError, input: &str) -> Error {
    let DerivativeError::Unsupported(func) = err;
    let name = func.name();
    let span = input
        .find(name)
        .map(|start| start..start + name.len())
        .unwrap_or(0..input.len());
    Error::Unsupported(deriv_error::Error::new(vec![span], NoDerivative { name: name.to_string() }))
}

/// Differentiates the formula in `input`.
pub fn derive(input: &str, config: &Config) -> Result<Derivation, Error> {
    let ast = Parser::new(input)
        .try_parse_full::<AstExpr>()
        .map_err(|err| Error::Parse(vec![err.into()]))?;
    debug!("parsed: {}", ast);

    let original = lower(&ast, &config.variable)?;
    debug!("lowered: {}", original);

    let derived = derivative(&original, &config.variable)
        .map_err(|err| unsupported(err, input))?;
    debug!("derivative: {}", derived);

    let derived = if config.simplify {
        let (simplified, rules) = simplify_with_steps(&derived);
        debug!("simplified with {} rule(s): {}", rules.len(), simplified);
        simplified
    } else {
        derived
    };

    let original_latex = original.as_display().to_string();
    let derivative_latex = derived.as_display().to_string();

    let mut steps = Vec::new();
    explain(&original, &config.variable, &original_latex, &derivative_latex, &mut steps);

    let samples = sample(derived.to_fn(&config.variable), &config.domain);

    let derivation = Derivation {
        original,
        derivative: derived,
        original_latex,
        derivative_latex,
        steps,
        samples,
    };

    let undefined = derivation.undefined_samples();
    if undefined > 0 {
        warn!("derivative is undefined at {} of {} sample(s)", undefined, derivation.samples.len());
    }

    Ok(derivation)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_is_relative_eq, afe_relative_error_msg, afe_abs, assert_float_relative_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(input: &str) -> Derivation {
        derive(input, &Config::default())
            .unwrap_or_else(|err| panic!("derivation of \"{input}\" failed: {err}"))
    }

    #[test]
    fn product_of_sine_and_square() {
        let derivation = run("sin(x) x^2");
        let expected = 1f64.cos() + 2.0 * 1f64.sin();
        assert_float_relative_eq!(derivation.derivative.eval("x", 1.0), expected, 1e-9);
    }

    #[test]
    fn fifth_power() {
        let derivation = run("x^5");
        assert_eq!(derivation.derivative_latex, "5\\,x^{4}");
        assert_float_relative_eq!(derivation.derivative.eval("x", 2.0), 80.0);
        assert_float_relative_eq!(derivation.derivative.eval("x", -1.0), 5.0);
    }

    #[test]
    fn chain_rule_at_zero() {
        let derivation = run("sin(2x)");
        assert_float_relative_eq!(derivation.derivative.eval("x", 0.0), 2.0);
    }

    #[test]
    fn explanation() {
        let derivation = run("x^2");
        assert_eq!(
            derivation.explanation(),
            [
                "Original function: $$f(x) = x^{2}$$",
                r"Find the derivative: $$\frac{d}{dx}\left(x^{2}\right)$$",
                "Applying the power rule or the chain rule.",
                "Result: $$f'(x) = 2\\,x$$",
            ].join("\n"),
        );
    }

    #[test]
    fn explanation_without_rule() {
        let derivation = run("5x");
        assert_eq!(derivation.steps.len(), 4);

        let derivation = run("x");
        let x = || "x".to_string();
        assert_eq!(derivation.steps, vec![
            Step::Original { variable: x(), latex: "x".to_string() },
            Step::FindDerivative { variable: x(), latex: "x".to_string() },
            Step::Result { variable: x(), latex: "1".to_string() },
        ]);
    }

    #[test]
    fn constant_derivative_samples() {
        let derivation = run("5x");
        assert_eq!(derivation.derivative_latex, "5");
        assert_eq!(derivation.samples.len(), 401);
        assert!(derivation.samples.iter().all(|s| s.y == 5.0));
    }

    #[test]
    fn reciprocal_is_undefined_at_zero() {
        let derivation = run("1/x");
        let nearest = derivation.samples
            .iter()
            .min_by(|a, b| a.x.abs().total_cmp(&b.x.abs()))
            .unwrap();
        assert!(!nearest.is_defined());
        assert_eq!(derivation.undefined_samples(), 1);
    }

    #[test]
    fn unsimplified() {
        let config = Config::default().with_simplify(false);
        let derivation = derive("x^2", &config).unwrap();
        assert_ne!(derivation.derivative_latex, "2\\,x");
        assert_float_relative_eq!(derivation.derivative.eval("x", 3.0), 6.0);
    }

    #[test]
    fn other_variable() {
        let config = Config::default().with_variable("t");
        let derivation = derive("t^3", &config).unwrap();
        assert_float_relative_eq!(derivation.derivative.eval("t", 2.0), 12.0);
        assert!(derive("x^3", &config).is_err());
    }

    #[test]
    fn explanation_names_the_variable() {
        let config = Config::default().with_variable("t");
        let derivation = derive("t^2", &config).unwrap();
        assert_eq!(
            derivation.explanation(),
            [
                "Original function: $$f(t) = t^{2}$$",
                r"Find the derivative: $$\frac{d}{dt}\left(t^{2}\right)$$",
                "Applying the power rule or the chain rule.",
                "Result: $$f'(t) = 2\\,t$$",
            ].join("\n"),
        );
    }

    #[test]
    fn reciprocal_uses_the_power_rule() {
        let derivation = run("1/x");
        assert_eq!(derivation.steps[2], Step::Rule(Rule::PowerOrChain));
    }

    #[test]
    fn division_by_zero_is_undefined_everywhere() {
        let derivation = run("x/0");
        assert_eq!(derivation.undefined_samples(), derivation.samples.len());
        assert!(derivation.samples.iter().all(|s| !s.is_defined()));
    }

    #[test]
    fn parse_errors() {
        for input in ["x +", "((x)", "foo(x)", "", "2 3", "1.2.3"] {
            let err = derive(input, &Config::default()).unwrap_err();
            assert_eq!(err.kind_name(), "ParseError", "input: {input:?}");
        }
    }

    #[test]
    fn unsupported_operations() {
        let err = derive("2 + floor(x)", &Config::default()).unwrap_err();
        assert_eq!(err.kind_name(), "UnsupportedOperationError");
        assert_eq!(err.errors()[0].spans, vec![4..9]);

        let err = derive("sin(x, 2)", &Config::default()).unwrap_err();
        assert_eq!(err.kind_name(), "UnsupportedOperationError");
    }
}
