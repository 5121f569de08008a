//! Operator tokens. Only negation is unary; the five arithmetic operators are binary.

use crate::{
    parser::{
        error::{Error, kind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Negation, the only prefix operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

/// A prefix operator and where it was written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Negation binds tighter than products but looser than powers, so `-x^2` is `-(x^2)`.
    pub fn precedence(&self) -> Precedence {
        match self.kind {
            UnaryOpKind::Neg => Precedence::Neg,
        }
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Sub {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Sub],
                found: token.kind,
            }));
        }

        Ok(Self { kind: UnaryOpKind::Neg, span: token.span })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("-")
    }
}

/// The arithmetic operators, from tightest to loosest binding.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

/// Token kinds that spell a binary operator, in the order reported by parse errors.
const BINARY_TOKENS: &[TokenKind] = &[
    TokenKind::Exp,
    TokenKind::Mul,
    TokenKind::Div,
    TokenKind::Add,
    TokenKind::Sub,
];

impl BinOpKind {
    /// Maps an operator token to the operation it spells.
    fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Powers group to the right (`2^3^2` is `2^(3^2)`); everything else groups to the left.
    pub fn associativity(&self) -> Associativity {
        if *self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }
}

/// A binary operator. Juxtaposition (`2x`, `x sin(x)`) produces an implicit multiplication.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// Set for multiplications the parser inserted between juxtaposed operands.
    pub implicit: bool,

    /// Implicit operators get an empty span where the right operand begins.
    pub span: Range<usize>,
}

impl BinOp {
    /// The multiplication between two juxtaposed operands, the second of which starts at `at`.
    pub fn implicit_mul(at: usize) -> Self {
        Self {
            kind: BinOpKind::Mul,
            implicit: true,
            span: at..at,
        }
    }

    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, implicit: false, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: BINARY_TOKENS,
                found: token.kind,
            })),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self.kind {
            BinOpKind::Exp => "^",
            BinOpKind::Mul if self.implicit => "",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Add => " + ",
            BinOpKind::Sub => " - ",
        };
        f.write_str(symbol)
    }
}
