//! Raw tokenization
//!
//! Tokenization is handled entirely by logos. Every character is covered by
//! some token pattern, so the lexer itself never rejects input; structural
//! errors are reported by the grammar.

use super::tokens::{Token, TokenLocation};
use logos::Logos;

/// Tokenize a string, keeping each token's byte range
pub fn tokenize_with_spans(source: &str) -> Vec<TokenLocation> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                tracing::warn!(span = ?lexer.span(), "skipping unlexable input");
            }
        }
    }

    tokens
}

/// Tokenize a string, dropping locations
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with_spans(source)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}
