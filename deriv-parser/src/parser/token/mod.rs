pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Consumes the next token if it has the given kind.
fn expect(input: &mut Parser, expected: &'static [TokenKind; 1]) -> Result<(String, Range<usize>), Error> {
    let token = input.next_token()?;
    if token.kind != expected[0] {
        return Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected,
            found: token.kind,
        }));
    }
    Ok((token.lexeme.to_owned(), token.span))
}

/// Declares one struct per listed token kind, so parse functions can ask for a specific token with
/// `input.try_parse::<Comma>()`.
macro_rules! single_tokens {
    ($($kind:ident),* $(,)?) => {$(
        #[derive(Clone, Debug, PartialEq)]
        pub(crate) struct $kind {
            pub(crate) lexeme: String,
            pub(crate) span: Range<usize>,
        }

        impl Parse for $kind {
            fn parse(input: &mut Parser) -> Result<Self, Error> {
                let (lexeme, span) = expect(input, &[TokenKind::$kind])?;
                Ok(Self { lexeme, span })
            }
        }
    )*};
}

single_tokens!(Name, Comma, OpenParen, CloseParen, Int, Float);
