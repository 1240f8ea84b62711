//! Blank line and indentation normalization
//!
//! Runs right after tokenization. Works on whole physical lines:
//!
//! 1. Lines holding nothing but whitespace are dropped together with their
//!    line break, so blank separators never reach the grammar.
//! 2. Leading whitespace of a kept line becomes a single `Indent` token with
//!    the same span.
//! 3. Trailing whitespace (including the `\r` of CRLF input) is dropped.
//!
//! Whitespace between tokens on a line is left alone; the grammar uses it to
//! split command lines into tokens.
//!
//! # Example
//!
//! Input tokens: `[Newline, Whitespace, Word, Whitespace, Newline, Whitespace, Newline]`
//! Output tokens: `[Indent, Word, Newline]`

use super::tokens::{Token, TokenLocation};

pub fn transform_blank_lines(tokens: Vec<TokenLocation>) -> Vec<TokenLocation> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut line: Vec<TokenLocation> = Vec::new();

    for (token, span) in tokens {
        if token == Token::Newline {
            emit_line(&mut result, std::mem::take(&mut line), Some(span));
        } else {
            line.push((token, span));
        }
    }
    emit_line(&mut result, line, None);

    result
}

fn emit_line(
    result: &mut Vec<TokenLocation>,
    mut line: Vec<TokenLocation>,
    newline: Option<std::ops::Range<usize>>,
) {
    while matches!(line.last(), Some((Token::Whitespace, _))) {
        line.pop();
    }
    if line.iter().all(|(token, _)| *token == Token::Whitespace) {
        return;
    }

    let mut tokens = line.into_iter().peekable();
    if let Some((Token::Whitespace, span)) = tokens.peek().cloned() {
        tokens.next();
        result.push((Token::Indent, span));
    }
    result.extend(tokens);

    if let Some(span) = newline {
        result.push((Token::Newline, span));
    }
}
