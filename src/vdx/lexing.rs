//! Lexer for configuration text
//!
//! Tokenization happens in three passes over a `Vec<(Token, Range<usize>)>`:
//!
//! 1. [`tokenize_with_spans`] - the logos lexer. Never fails; every character
//!    belongs to some token.
//! 2. [`transform_blank_lines`] - drops blank lines and trailing whitespace and
//!    turns leading whitespace into `Indent`.
//! 3. [`resolve_blocks`] - decides which header lines open blocks and marks them
//!    with `BlockOpen`. This is the only pass that can fail.
//!
//! Keeping the line-level decisions out of the combinator grammar lets the
//! grammar stay predictive: it never has to guess whether a line is a header.

pub mod blank_lines;
pub mod block_resolution;
pub mod lexer_impl;
pub mod tokens;

pub use blank_lines::transform_blank_lines;
pub use block_resolution::resolve_blocks;
pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::{Token, TokenLocation};

use crate::vdx::config::ParserConfig;
use crate::vdx::error::SyntaxError;

/// Run all lexing passes, producing the token stream the grammar consumes
pub fn lex(source: &str, config: &ParserConfig) -> Result<Vec<TokenLocation>, SyntaxError> {
    let raw = tokenize_with_spans(source);
    tracing::trace!(tokens = raw.len(), "tokenized");
    let normalized = transform_blank_lines(raw);
    resolve_blocks(normalized, source, config.depth_limit())
}
