//! Every way a formula can fail to parse.

use ariadne::Fmt;
use deriv_attrs::ErrorKind;
use deriv_error::EXPR;
use crate::tokenizer::TokenKind;

/// Nothing but whitespace was given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty input",
    labels = [""],
    help = format!("type a formula in {}, for example `x^2 + sin(x)`", "x".fg(EXPR)),
)]
pub struct EmptyInput;

/// The formula stops in the middle of an operation, as in `x +`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("an {} is missing here", "operand".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete formula was parsed, but more input follows it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("this does not continue the {} before it", "formula".fg(EXPR))],
    help = "use `*` or `^` to combine the two parts",
)]
pub struct ExpectedEof;

/// A token appeared where it cannot start or continue an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!(
        "found {:?}, but expected {}",
        found,
        expected.iter().map(|kind| format!("{:?}", kind)).collect::<Vec<_>>().join(" or "),
    )],
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],
    pub found: TokenKind,
}

/// Parentheses do not pair up.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = [if *opening { "this `(` is never closed" } else { "this `)` has no matching `(`" }],
)]
pub struct UnclosedParenthesis {
    /// True for a `(` without a `)`, false for a stray `)`.
    pub opening: bool,
}

/// `()` with nothing between.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["expected an expression between these"],
)]
pub struct EmptyParenthesis;
