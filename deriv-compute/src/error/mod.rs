pub mod kind;

use std::{fmt, io, slice};

/// Why a formula could not be differentiated.
///
/// Errors are split in two classes. A [`Error::Parse`] means the input is not a formula this
/// crate understands, and may carry several problems found at once. An [`Error::Unsupported`]
/// means the formula is well-formed but uses an operation that cannot be differentiated.
#[derive(Debug)]
pub enum Error {
    /// The input could not be parsed, or referenced unknown names.
    Parse(Vec<deriv_error::Error>),

    /// The input is well-formed, but uses an unsupported operation.
    Unsupported(deriv_error::Error),
}

impl Error {
    /// The name of the error class: `ParseError` or `UnsupportedOperationError`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Parse(_) => "ParseError",
            Self::Unsupported(_) => "UnsupportedOperationError",
        }
    }

    /// Returns the individual errors that make up this error.
    pub fn errors(&self) -> &[deriv_error::Error] {
        match self {
            Self::Parse(errors) => errors,
            Self::Unsupported(error) => slice::from_ref(error),
        }
    }

    /// A one-line description of every problem in the input.
    pub fn message(&self) -> String {
        self.errors()
            .iter()
            .map(deriv_error::Error::message)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Reports every error to stderr, highlighting the regions of `input` they originated from.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        for error in self.errors() {
            error.report_to_stderr(src_id, input)?;
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind_name(), self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn joins_messages() {
        let err = Error::Parse(vec![
            deriv_error::Error::new(vec![0..1], kind::UnknownSymbol {
                name: "y".to_string(),
                variable: "x".to_string(),
                suggestions: vec![],
            }),
            deriv_error::Error::new(vec![4..7], kind::UnknownFunction {
                name: "foo".to_string(),
                suggestions: vec![],
            }),
        ]);
        assert_eq!(err.kind_name(), "ParseError");
        assert_eq!(
            err.to_string(),
            "ParseError: unknown symbol `y`; the `foo` function does not exist",
        );
    }

    #[test]
    fn suggestion_help() {
        let err = deriv_error::Error::new(vec![0..4], kind::UnknownFunction {
            name: "sinn".to_string(),
            suggestions: vec!["sin".to_string(), "sinh".to_string()],
        });
        let rendered = err.render("input", "sinn(x)").unwrap();
        assert!(rendered.contains("did you mean one of these? `sin`, `sinh`"));
    }
}
