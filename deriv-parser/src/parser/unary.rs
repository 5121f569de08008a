use std::{fmt, ops::Range};
use crate::parser::{
    binary::Binary,
    error::Error,
    expr::{Expr, Primary},
    token::op::UnaryOp,
    Parser,
};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    ///
    /// The operand of a prefix operator absorbs every binary operation of higher precedence, so
    /// `-x^2` is parsed as `-(x^2)` while `-x * 2` is parsed as `(-x) * 2`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Ok(op) = input.try_parse::<UnaryOp>() else {
            return input.try_parse::<Primary>().map(Into::into);
        };

        let operand = Self::parse_or_lower(input)?;
        let operand = Binary::parse_expr(input, operand, op.precedence())?;
        let span = op.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
