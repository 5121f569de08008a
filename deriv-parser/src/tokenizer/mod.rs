pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Tokenizes the whole input up front, so that the parser can backtrack freely. Characters that
/// no other token matches become [`TokenKind::Symbol`] tokens, which the parser rejects with a
/// spanned error.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    tokenize(input)
        .spanned()
        .filter_map(|(kind, span)| Some(Token {
            kind: kind.ok()?,
            lexeme: &input[span.clone()],
            span,
        }))
        .collect()
}
