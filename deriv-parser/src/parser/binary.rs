use std::{fmt, ops::Range};
use crate::{
    parser::{
        error::Error,
        expr::{Expr, Primary},
        token::op::BinOp,
        unary::Unary,
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the operator that follows in the stream without consuming it.
    ///
    /// If no explicit operator follows, but a primary expression does, the result is an implicit
    /// multiplication operator. A number never starts the right operand of an implicit product:
    /// `2 3` and `1.2.3` are rejected rather than read as products.
    fn peek_op(input: &Parser) -> Option<BinOp> {
        let mut ahead = input.clone();
        if let Ok(op) = ahead.try_parse::<BinOp>() {
            return Some(op);
        }

        input.peek_kind()
            .filter(|kind| kind.starts_primary() && !matches!(kind, TokenKind::Int | TokenKind::Float))
            .map(|_| BinOp::implicit_mul(input.span().start))
    }

    /// After parsing the right-hand side of a binary expression, keep parsing operators with
    /// higher precedence (or equal precedence and right associativity) into the right-hand side.
    fn complete_rhs(input: &mut Parser, op: &BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some(next_op) = Self::peek_op(input) {
            let next_precedence = next_op.precedence();
            let climbs = next_precedence > precedence
                || (next_precedence == precedence && next_op.associativity() == Associativity::Right);
            if !climbs {
                break;
            }

            rhs = Self::parse_expr(input, rhs, next_precedence)?;
        }

        Ok(rhs)
    }

    /// Parses a binary expression with the given left-hand side, continuing as long as the
    /// operators found have a precedence of at least `precedence`.
    ///
    /// This is a precedence climbing parser: each operator parses its right-hand side with
    /// [`Binary::complete_rhs`], which recursively absorbs the operators that bind tighter.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::peek_op(input) {
            if op.precedence() < precedence {
                break;
            }

            let rhs = if op.implicit {
                // only a primary expression can follow without an operator, so that `x -1` stays
                // a subtraction
                input.try_parse::<Primary>()?.into()
            } else {
                input.try_parse::<BinOp>()?;
                Unary::parse_or_lower(input)?
            };
            let rhs = Self::complete_rhs(input, &op, rhs)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Self {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}
