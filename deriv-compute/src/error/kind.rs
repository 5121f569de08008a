use ariadne::Fmt;
use deriv_attrs::ErrorKind;
use deriv_error::EXPR;

/// Formats the "did you mean" help text for a list of similar names.
fn suggest(suggestions: &[String], fallback: String) -> String {
    match suggestions {
        [] => fallback,
        [only] => format!("did you mean `{}`?", only.fg(EXPR)),
        many => format!(
            "did you mean one of these? {}",
            many.iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// A name that is neither the variable, a constant, nor a function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", name),
    labels = ["this symbol"],
    help = suggest(
        suggestions,
        format!(
            "the formula may only use the variable {} and the constants {} and {}",
            variable.fg(EXPR),
            "pi".fg(EXPR),
            "e".fg(EXPR),
        ),
    ),
)]
pub struct UnknownSymbol {
    /// The name of the symbol.
    pub name: String,

    /// The variable of differentiation.
    pub variable: String,

    /// Similarly named symbols, if any.
    pub suggestions: Vec<String>,
}

/// A call of a function that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = suggest(suggestions, "see `deriv --help` for a list of available functions".to_string()),
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// Similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function name was used without parentheses, such as `sin x`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function is missing its argument", name),
    labels = ["this function"],
    help = format!("surround the argument with parentheses: {}", format!("{}(...)", name).fg(EXPR)),
)]
pub struct MissingArgs {
    /// The name of the function.
    pub name: String,
}

/// A function was called with a number of arguments other than one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function takes exactly one argument", name),
    labels = ["this function call", ""],
    help = format!("{} argument(s) were given here", given),
)]
pub struct WrongArity {
    /// The name of the function.
    pub name: String,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A function with no closed-form derivative.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate the `{}` function", name),
    labels = ["this function"],
    help = format!("`{}` is piecewise constant and has no symbolic derivative", name.fg(EXPR)),
)]
pub struct NoDerivative {
    /// The name of the function.
    pub name: String,
}

/// A numeric literal that could not be converted to a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal, as written.
    pub literal: String,
}
