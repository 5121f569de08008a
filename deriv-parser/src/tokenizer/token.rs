use logos::Logos;
use std::ops::Range;

/// Lexical classes of a formula. Every input character belongs to some token, so lexing never
/// fails.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    /// Both the caret and the double asterisk denote exponentiation.
    #[token("^")]
    #[token("**")]
    Exp,

    #[regex(r"[a-zA-Z_]+")]
    Name,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]*\.[0-9]+")]
    Float,

    /// Any character that does not start another token.
    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if a token of this kind can begin a primary expression (a literal, a function
    /// call, or a parenthesized expression).
    pub fn starts_primary(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Name | TokenKind::OpenParen)
    }
}

/// A token borrowed from the formula it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// Byte range in the formula.
    pub span: Range<usize>,
    pub kind: TokenKind,
    pub lexeme: &'source str,
}

impl Token<'_> {
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
