pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use error::{kind, Error};
use deriv_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Returns the first alternative that parses. A fatal error from any alternative is returned
/// immediately; if every alternative fails softly, execution continues after the macro.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                Err(_) => {},
            }
        )+
    }};
}

/// A backtracking recursive-descent parser over the tokens of one formula.
///
/// ```
/// use deriv_parser::parser::{expr::Expr, Parser};
///
/// let ast = Parser::new("x^2 sin(x)").try_parse_full::<Expr>().unwrap();
/// assert_eq!(ast.to_string(), "x^2sin(x)");
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Box<[Token<'source>]>,

    /// Index of the next token to consume.
    cursor: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// An error pointing at the next token.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// A fatal error pointing at the next token. Fatal errors stop backtracking.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// The empty span just past the last token.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Span of the next non-whitespace token, or [`Parser::eof_span`] if there is none.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.clone().next_token().ok().map(|token| token.kind)
    }

    /// Consumes whitespace and then one more token, which is returned.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        let rest = self.tokens.get(self.cursor..).unwrap_or_default();
        match rest.iter().position(|token| !token.is_whitespace()) {
            Some(offset) => {
                let token = rest[offset].clone();
                self.cursor += offset + 1;
                Ok(token)
            },
            None => {
                self.cursor = self.tokens.len();
                Err(self.error(kind::UnexpectedEof))
            },
        }
    }

    /// Returns true if only whitespace remains in the stream.
    fn at_end(&self) -> bool {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .all(Token::is_whitespace)
    }

    /// Parses a `T`, rewinding the cursor if that fails.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Runs `f`, rewinding the cursor if it fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        f(self).map_err(|err| {
            self.cursor = start;
            err
        })
    }

    /// Parses a `T` that must span the whole input. Leftover input is reported as precisely as
    /// possible: a stray `)`, a token that cannot follow an operand, or anything else.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        if self.at_end() {
            return Err(self.error(kind::EmptyInput));
        }

        let value = T::parse(self)?;
        if self.at_end() {
            return Ok(value);
        }

        match self.peek_kind() {
            Some(TokenKind::CloseParen) => Err(self.error_fatal(kind::UnclosedParenthesis { opening: false })),
            Some(found) if !found.starts_primary() => Err(self.error(kind::UnexpectedToken {
                expected: &[
                    TokenKind::Exp,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                ],
                found,
            })),
            _ => Err(Error::new(vec![self.span().start..self.eof_span().end], kind::ExpectedEof)),
        }
    }
}

/// A syntax node that can be parsed. Implementations may leave the cursor anywhere on failure;
/// callers go through [`Parser::try_parse`], which rewinds it.
pub trait Parse: Sized {
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// How a chain of equal-precedence operators groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    /// Used to parse a whole expression.
    Any,

    /// `+` and `-`.
    Term,

    /// `*`, `/`, and juxtaposition.
    Factor,

    /// Prefix `-`.
    Neg,

    /// `^` and `**`.
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitFloat, LitInt, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    fn parse_err(input: &str) -> Error {
        Parser::new(input).try_parse_full::<Expr>().unwrap_err()
    }

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit: false, span }
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn surrounding_whitespace() {
        assert_eq!(parse("  x \n"), sym("x", 2..3));
    }

    #[test]
    fn binary_left_associativity() {
        assert_eq!(parse("1 - 2 - 3"), Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("1", 0..1)),
                op: op(BinOpKind::Sub, 2..3),
                rhs: Box::new(int("2", 4..5)),
                span: 0..5,
            })),
            op: op(BinOpKind::Sub, 6..7),
            rhs: Box::new(int("3", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn exp_right_associativity() {
        assert_eq!(parse("2^3^x"), Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: op(BinOpKind::Exp, 1..2),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 2..3)),
                op: op(BinOpKind::Exp, 3..4),
                rhs: Box::new(sym("x", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn precedence_of_product_over_sum() {
        assert_eq!(parse("1 + 2 * x"), Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: op(BinOpKind::Add, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: op(BinOpKind::Mul, 6..7),
                rhs: Box::new(sym("x", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(parse("x**-1"), Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: op(BinOpKind::Exp, 1..3),
            rhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(int("1", 4..5)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 3..4 },
                span: 3..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("3x^2"), Expr::Binary(Binary {
            lhs: Box::new(int("3", 0..1)),
            op: BinOp::implicit_mul(1),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication_of_parens() {
        assert_eq!(parse("(x)(2)"), Expr::Binary(Binary {
            lhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(sym("x", 1..2)),
                span: 0..3,
            })),
            op: BinOp::implicit_mul(3),
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(int("2", 4..5)),
                span: 3..6,
            })),
            span: 0..6,
        }));
    }

    #[test]
    fn function_call() {
        assert_eq!(parse("sin(2, x)"), Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![int("2", 4..5), sym("x", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn function_without_args() {
        assert_eq!(parse("cos()"), Expr::Call(Call {
            name: LitSym { name: "cos".to_string(), span: 0..3 },
            args: vec![],
            span: 0..5,
            paren_span: 3..5,
        }));
    }

    #[test]
    fn display_round_trip() {
        let source = "3x^2 - sin(2x)/(x + 1)";
        let printed = parse(source).to_string();
        assert_eq!(printed, source);
    }

    #[test]
    fn dangling_operator() {
        let err = parse_err("x +");
        assert_eq!(err.kind.message(), "unexpected end of input");
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn unclosed_opening_parenthesis() {
        let err = parse_err("((x)");
        assert!(err.fatal);
        assert_eq!(err.kind.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unclosed_function_call() {
        let err = parse_err("2sin(x");
        assert_eq!(err.kind.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn unopened_closing_parenthesis() {
        let err = parse_err("x + 1)");
        assert_eq!(err.kind.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_parenthesis() {
        let err = parse_err("2 * ()");
        assert_eq!(err.kind.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_err("   ").kind.message(), "empty input");
        assert_eq!(parse_err("").kind.message(), "empty input");
    }

    #[test]
    fn stray_symbol() {
        let err = parse_err("x $ 2");
        assert_eq!(err.kind.message(), "unexpected token");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn doubled_operator() {
        let err = parse_err("x * / 2");
        assert_eq!(err.kind.message(), "unexpected token");
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn juxtaposed_numbers() {
        let err = parse_err("2 3");
        assert_eq!(err.kind.message(), "expected end of input");
        assert_eq!(err.spans, vec![2..3]);

        let err = parse_err("1.2.3");
        assert_eq!(err.kind.message(), "expected end of input");
        assert_eq!(err.spans, vec![3..5]);

        let err = parse_err("x 2 3");
        assert_eq!(err.kind.message(), "expected end of input");
        assert_eq!(err.spans, vec![2..5]);
    }
}
