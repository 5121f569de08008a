use std::{fmt, ops::Range};
use super::{
    error::{kind, Error},
    expr::Expr,
    literal::LitSym,
    token::{CloseParen, Comma, OpenParen},
    Parse,
    Parser,
};

/// A function call, such as `sin(2x)`. Any number of arguments is accepted by the parser; checking
/// the arity is left to the consumer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }

    /// Parses the arguments after the opening parenthesis, up to and including the closing
    /// parenthesis.
    fn parse_args(input: &mut Parser, open_paren: Range<usize>) -> Result<(Vec<Expr>, CloseParen), Error> {
        let mut args = Vec::new();
        if let Ok(close_paren) = input.try_parse::<CloseParen>() {
            return Ok((args, close_paren));
        }

        loop {
            args.push(input.try_parse::<Expr>()?);

            if input.try_parse::<Comma>().is_ok() {
                continue;
            }

            return input.try_parse::<CloseParen>()
                .map(|close_paren| (args, close_paren))
                .map_err(|_| Error::new(vec![open_paren], kind::UnclosedParenthesis { opening: true }));
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        // a name directly followed by `(` can only be a call
        let (args, close_paren) = Self::parse_args(input, open_paren.span.clone())
            .map_err(Error::into_fatal)?;

        // use `name` here before it is moved into the struct
        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
