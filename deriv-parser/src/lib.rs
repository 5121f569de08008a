//! Tokenizer and parser for single-variable formulas such as `3x^2 - sin(2x) / x`.
//!
//! The parser produces a spanned abstract syntax tree ([`parser::expr::Expr`]); it knows nothing
//! about which names are valid. Validating identifiers and lowering the tree into an algebraic
//! representation is left to the consumer.

pub mod parser;
pub mod tokenizer;
