use crate::symbolic::{expr::Primary, SymExpr};
use std::fmt;

/// The differentiation rule that applies to the outermost operation of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    /// `(u + v)' = u' + v'`
    Sum,

    /// `(uv)' = u'v + uv'`
    Product,

    /// Powers of any kind. Which of the two applies depends on the base and the exponent, which
    /// are not inspected.
    PowerOrChain,

    /// A trigonometric function.
    Trigonometric,
}

impl Rule {
    /// The sentence that explains the rule to the reader. The formulas are LaTeX display math.
    pub fn description(self) -> &'static str {
        match self {
            Self::Sum => r"Applying the sum rule: $$(u+v)' = u' + v'$$",
            Self::Product => r"Applying the product rule: $$(uv)' = u'v + uv'$$",
            Self::PowerOrChain => "Applying the power rule or the chain rule.",
            Self::Trigonometric => "Applying the differentiation rules for trigonometric functions.",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Classifies the expression by its outermost operation only. Nested operations are never
/// inspected, so `sin(x)^2` is a power and `2x + sin(x)` is a sum.
pub fn classify(expr: &SymExpr) -> Option<Rule> {
    match expr {
        SymExpr::Add(_) => Some(Rule::Sum),
        SymExpr::Mul(_) => Some(Rule::Product),
        SymExpr::Exp(..) => Some(Rule::PowerOrChain),
        SymExpr::Primary(Primary::Call(func, _)) if func.is_trigonometric() => Some(Rule::Trigonometric),
        SymExpr::Primary(_) => None,
    }
}
