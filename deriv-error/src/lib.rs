//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

// lets `#[derive(ErrorKind)]` resolve `deriv_error::` paths inside this crate's own tests
extern crate self as deriv_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// A one-line description of the error, without any source context.
    fn message(&self) -> String;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// A one-line description of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Report this error to stderr, highlighting the regions of `input` it originated from.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so its
    /// `eprint` method is the only way to print it.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Render the full report to a string with the terminal colors removed.
    pub fn render(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&strip_ansi_escapes::strip(buf)).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use deriv_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown symbol `{}`", name),
        labels = ["this symbol"],
        help = "only `x` can be used here",
    )]
    struct UnknownSymbol {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "unexpected end of input")]
    struct UnexpectedEof;

    #[test]
    fn derived_message() {
        let err = Error::new(vec![4..5], UnknownSymbol { name: "y".to_string() });
        assert_eq!(err.message(), "unknown symbol `y`");
        assert_eq!(Error::new(vec![0..0], UnexpectedEof).message(), "unexpected end of input");
    }

    #[test]
    fn render_report() {
        let input = "2 + y";
        let err = Error::new(vec![4..5], UnknownSymbol { name: "y".to_string() });
        let rendered = err.render("input", input).unwrap();

        assert!(rendered.contains("unknown symbol `y`"));
        assert!(rendered.contains("this symbol"));
        assert!(rendered.contains("only `x` can be used here"));
        assert!(rendered.contains("2 + y"));
    }
}
