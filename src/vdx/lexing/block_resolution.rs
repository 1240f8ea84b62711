//! Block resolution
//!
//! A header line and a plain line look the same: both are a run of tokens.
//! Whether a line opens a block is only known once a later `!` closes it, so
//! the grammar is ambiguous one token in. This pass settles the question over
//! whole lines before the grammar runs and puts a zero-width `BlockOpen` token
//! right after the text of every header. The grammar then only has to look
//! one token ahead.
//!
//! ## Matching terminators
//!
//! Lines are classified as text lines, terminator lines (`!` alone) and
//! invalid lines (anything that can't start an item). A text line directly
//! followed by another text line is a candidate header: it has a body to own.
//! Candidates wait on a stack, and every `!` closes one of them. Everything
//! stacked above the chosen header becomes a plain line of its body.
//!
//! Each `!` picks the outermost pending header that still leaves enough
//! headers open for the terminators after it. How many must stay open is
//! worked out for every `!` in one backward pass (`reserve`), so
//! `cee-map\n a\n b\n!` closes `cee-map` around both leaves, while
//! `fcoe\n fabric-map\n  vlan\n !\n!` still nests. Both passes are linear in
//! the number of lines.
//!
//! A `!` with nothing left to close ends the pass. The grammar reports it.
//!
//! ## Diagnostics
//!
//! - Plain lines after the last `!` are top-level leaves. If one of them is
//!   followed by lines that are all indented deeper than it, up to the end of
//!   input, it reads as a header missing its `!` and is reported as an
//!   unterminated block. Indentation is only looked at here; it never changes
//!   nesting.
//! - Blocks nested deeper than the configured limit fail before the grammar
//!   recurses into them.

use super::tokens::{Token, TokenLocation};
use crate::vdx::ast::SourceLocation;
use crate::vdx::error::SyntaxError;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Text,
    Terminator,
    Invalid,
}

/// One non-blank source line, as token indices
#[derive(Debug, Clone)]
struct LineInfo {
    kind: LineKind,
    /// Index of the first token after the indentation
    first: usize,
    /// Index one past the last token of the line (the newline, if any)
    end: usize,
    /// Width in bytes of the leading indentation
    indent: usize,
}

fn split_lines(tokens: &[TokenLocation]) -> Vec<LineInfo> {
    let mut lines = Vec::new();
    let mut start = 0;

    while start < tokens.len() {
        let end = tokens[start..]
            .iter()
            .position(|(token, _)| *token == Token::Newline)
            .map_or(tokens.len(), |offset| start + offset);

        let (first, indent) = match &tokens[start] {
            (Token::Indent, span) => (start + 1, span.len()),
            _ => (start, 0),
        };

        let content: Vec<Token> = tokens[first..end].iter().map(|(t, _)| *t).collect();
        let kind = match content.as_slice() {
            [Token::Terminator] => LineKind::Terminator,
            [Token::Word, ..] => LineKind::Text,
            _ => LineKind::Invalid,
        };

        lines.push(LineInfo {
            kind,
            first,
            end,
            indent,
        });
        start = end + 1;
    }

    lines
}

/// Which header each terminator closes
#[derive(Debug)]
struct Matching {
    /// `Some(t)` for a header line closed by the terminator on line `t`
    closed_by: Vec<Option<usize>>,
    /// Lines covered by the matching; a stray `!` or an invalid line stops it
    resolved: usize,
    /// Line just after the last matched terminator
    tail: usize,
}

impl Matching {
    fn compute(lines: &[LineInfo]) -> Self {
        let limit = lines
            .iter()
            .position(|line| line.kind == LineKind::Invalid)
            .unwrap_or(lines.len());
        let candidate = |i: usize| {
            lines[i].kind == LineKind::Text
                && i + 1 < limit
                && lines[i + 1].kind == LineKind::Text
        };

        // Headers that must stay pending after each `!` for the rest to match
        let mut reserve = vec![0usize; limit];
        let mut next_reserve = None;
        let mut candidates_between = 0usize;
        for i in (0..limit).rev() {
            match lines[i].kind {
                LineKind::Terminator => {
                    reserve[i] = next_reserve
                        .map_or(0, |next: usize| (next + 1).saturating_sub(candidates_between));
                    next_reserve = Some(reserve[i]);
                    candidates_between = 0;
                }
                LineKind::Text if candidate(i) => candidates_between += 1,
                _ => {}
            }
        }

        let mut closed_by = vec![None; lines.len()];
        let mut pending: Vec<usize> = Vec::new();
        let mut tail = 0;
        for i in 0..limit {
            match lines[i].kind {
                LineKind::Text if candidate(i) => pending.push(i),
                LineKind::Terminator => {
                    if pending.is_empty() {
                        return Self {
                            closed_by,
                            resolved: i,
                            tail,
                        };
                    }
                    let chosen = reserve[i].min(pending.len() - 1);
                    closed_by[pending[chosen]] = Some(i);
                    pending.truncate(chosen);
                    tail = i + 1;
                }
                _ => {}
            }
        }

        Self {
            closed_by,
            resolved: limit,
            tail,
        }
    }
}

struct Resolver<'a> {
    source: &'a str,
    source_loc: SourceLocation,
    tokens: &'a [TokenLocation],
    lines: Vec<LineInfo>,
    matching: Matching,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    fn header_range(&self, line: usize) -> Range<usize> {
        let info = &self.lines[line];
        let start = self.tokens[info.first].1.start;
        let end = self.tokens[info.end - 1].1.end;
        start..end
    }

    fn header_text(&self, line: usize) -> String {
        self.source[self.header_range(line)]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lines that open blocks, in source order, checked against the depth limit
    fn openers(&self) -> Result<Vec<bool>, SyntaxError> {
        let mut opens = vec![false; self.lines.len()];
        let mut open_until: Vec<usize> = Vec::new();

        for line in 0..self.matching.resolved {
            while open_until.last().is_some_and(|end| *end < line) {
                open_until.pop();
            }
            if let Some(end) = self.matching.closed_by[line] {
                if open_until.len() >= self.max_depth {
                    return Err(SyntaxError::depth_exceeded(
                        self.max_depth,
                        self.header_range(line),
                        &self.source_loc,
                    ));
                }
                opens[line] = true;
                open_until.push(end);
            }
        }

        Ok(opens)
    }

    fn check_terminated(&self) -> Result<(), SyntaxError> {
        let n = self.lines.len();
        if self.matching.resolved < n {
            return Ok(());
        }

        // Smallest indentation among the lines after each tail line
        let tail = self.matching.tail;
        let mut shallowest_after = vec![usize::MAX; n];
        for i in (tail..n.saturating_sub(1)).rev() {
            shallowest_after[i] = self.lines[i + 1].indent.min(shallowest_after[i + 1]);
        }

        let header = (tail..n.saturating_sub(1))
            .find(|&i| shallowest_after[i] > self.lines[i].indent);
        match header {
            Some(header) => Err(SyntaxError::unterminated_block(
                self.header_text(header),
                self.header_range(header),
                &self.source_loc,
            )),
            None => Ok(()),
        }
    }
}

/// Insert `BlockOpen` after every header that opens a block
///
/// Expects tokens that went through
/// [`transform_blank_lines`](super::blank_lines::transform_blank_lines).
pub fn resolve_blocks(
    tokens: Vec<TokenLocation>,
    source: &str,
    max_depth: usize,
) -> Result<Vec<TokenLocation>, SyntaxError> {
    let lines = split_lines(&tokens);
    let matching = Matching::compute(&lines);
    let resolver = Resolver {
        source,
        source_loc: SourceLocation::new(source),
        tokens: &tokens,
        lines,
        matching,
        max_depth,
    };
    let opens = resolver.openers()?;
    resolver.check_terminated()?;

    let mut insert_at = vec![false; tokens.len() + 1];
    for (info, _) in resolver.lines.iter().zip(&opens).filter(|(_, open)| **open) {
        insert_at[info.end] = true;
    }
    let block_count = opens.iter().filter(|open| **open).count();
    tracing::debug!(
        lines = resolver.lines.len(),
        blocks = block_count,
        "resolved block structure"
    );

    let mut result: Vec<TokenLocation> = Vec::with_capacity(tokens.len() + block_count);
    for (index, (token, span)) in tokens.into_iter().enumerate() {
        if insert_at[index] {
            let at = result
                .last()
                .map_or(span.start, |(_, previous)| previous.end);
            result.push((Token::BlockOpen, at..at));
        }
        result.push((token, span));
    }

    Ok(result)
}
