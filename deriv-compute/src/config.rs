use crate::numerical::Domain;

/// Options that control how a formula is differentiated and sampled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// The name of the variable to differentiate with respect to.
    pub variable: String,

    /// The points at which the derivative is sampled.
    pub domain: Domain,

    /// Whether to simplify the derivative before typesetting and sampling it.
    pub simplify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable: String::from("x"),
            domain: Domain::default(),
            simplify: true,
        }
    }
}

impl Config {
    /// Sets the variable to differentiate with respect to.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Sets the sampling domain.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets whether the derivative is simplified.
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }
}
