//! Grammar rules for configuration text
//!
//! The grammar, in PEG notation, over the lexed token stream:
//!
//! ```text
//! document <- Newline* (item (Newline item)*)? Newline* EOI
//! item     <- block / line
//! block    <- Indent? text BlockOpen Newline item (Newline item)* Newline Indent? Terminator
//! line     <- Indent? text
//! text     <- token (Whitespace (token / Terminator))*
//! token    <- Word
//! ```
//!
//! `BlockOpen` comes from block resolution, which has already made the
//! `block / line` choice for every header. With it in the stream each rule is
//! decided by the next token, so the combinators never backtrack over more
//! than one line.

use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;

use super::ir::{NodeType, ParseNode};
use crate::vdx::ast::SourceLocation;
use crate::vdx::error::{SyntaxError, SyntaxErrorKind};
use crate::vdx::lexing::{Token, TokenLocation};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenLocation>;

/// Match a single token of the given kind
fn token(kind: Token) -> impl Parser<TokenLocation, TokenLocation, Error = ParserError> + Clone {
    filter_map(move |span: Range<usize>, (found, range): TokenLocation| {
        if found == kind {
            Ok((found, range))
        } else {
            Err(Simple::expected_input_found(
                span,
                [Some((kind, 0..0))],
                Some((found, range)),
            ))
        }
    })
}

fn token_node((token, span): TokenLocation) -> ParseNode {
    ParseNode::new(NodeType::Token, span.clone(), vec![(token, span)], vec![])
}

/// `text <- token (Whitespace (token / Terminator))*`
fn text() -> impl Parser<TokenLocation, ParseNode, Error = ParserError> + Clone {
    let later = token(Token::Word).or(token(Token::Terminator)).map(token_node);

    token(Token::Word)
        .map(token_node)
        .then(token(Token::Whitespace).then(later).repeated())
        .map(|(first, rest)| {
            let start = first.span.start;
            let end = rest.last().map_or(first.span.end, |(_, node)| node.span.end);
            let mut separators = Vec::with_capacity(rest.len());
            let mut children = vec![first];
            for (whitespace, node) in rest {
                separators.push(whitespace);
                children.push(node);
            }
            ParseNode::new(NodeType::Text, start..end, separators, children)
        })
}

/// `Indent? text`, shared by lines and block headers
fn indented_text(
) -> impl Parser<TokenLocation, (Option<TokenLocation>, ParseNode), Error = ParserError> + Clone {
    token(Token::Indent).or_not().then(text())
}

fn line() -> impl Parser<TokenLocation, ParseNode, Error = ParserError> + Clone {
    indented_text()
        .map(|(indent, text)| {
            let start = indent.as_ref().map_or(text.span.start, |(_, span)| span.start);
            let span = start..text.span.end;
            ParseNode::new(NodeType::Line, span, indent.into_iter().collect(), vec![text])
        })
        .labelled("line")
}

/// `item <- block / line`, recursive through block bodies
fn item() -> impl Parser<TokenLocation, ParseNode, Error = ParserError> + Clone {
    recursive(|item| {
        let header = indented_text()
            .then_ignore(token(Token::BlockOpen))
            .then_ignore(token(Token::Newline));
        let body = item.separated_by(token(Token::Newline)).at_least(1);
        let close = token(Token::Newline)
            .ignore_then(token(Token::Indent).or_not())
            .then(token(Token::Terminator));

        let block = header
            .then(body)
            .then(close)
            .map(|(((indent, text), body), (close_indent, terminator))| {
                let start = indent.as_ref().map_or(text.span.start, |(_, span)| span.start);
                let span = start..terminator.1.end;
                let mut tokens: Vec<TokenLocation> = indent.into_iter().collect();
                tokens.extend(close_indent);
                tokens.push(terminator);
                let mut children = Vec::with_capacity(body.len() + 1);
                children.push(text);
                children.extend(body);
                ParseNode::new(NodeType::Block, span, tokens, children)
            })
            .labelled("block");

        block.or(line()).map(|node| {
            ParseNode::new(NodeType::Item, node.span.clone(), vec![], vec![node])
        })
    })
}

/// `document <- Newline* (item (Newline item)*)? Newline* EOI`
pub(crate) fn document(
    source_len: usize,
) -> impl Parser<TokenLocation, ParseNode, Error = ParserError> + Clone {
    token(Token::Newline)
        .repeated()
        .ignore_then(item().separated_by(token(Token::Newline)))
        .then_ignore(token(Token::Newline).repeated())
        .then_ignore(end())
        .map(move |items| ParseNode::new(NodeType::Document, 0..source_len, vec![], items))
        .labelled("document")
}

/// Run the grammar over lexed tokens
pub(crate) fn parse_tokens(tokens: Vec<TokenLocation>, source: &str) -> Result<ParseNode, SyntaxError> {
    let eoi = source.len();
    let stream = Stream::from_iter(
        eoi..eoi,
        tokens
            .into_iter()
            .map(|(token, span)| ((token, span.clone()), span)),
    );

    document(eoi).parse(stream).map_err(|errors| {
        let source_loc = SourceLocation::new(source);
        let first = errors
            .into_iter()
            .min_by_key(|err| err.span().start)
            .map(|err| to_syntax_error(err, source, &source_loc));
        first.unwrap_or_else(|| {
            SyntaxError::new(SyntaxErrorKind::Unexpected, eoi..eoi, &source_loc)
        })
    })
}

/// How a found token is named in a message
fn describe_found((token, span): &TokenLocation, source: &str) -> String {
    match token {
        Token::Word | Token::Terminator => {
            format!("`{}`", source.get(span.clone()).unwrap_or_default())
        }
        other => other.describe().to_string(),
    }
}

fn to_syntax_error(err: ParserError, source: &str, source_loc: &SourceLocation) -> SyntaxError {
    let expected = err
        .expected()
        .filter_map(|expected| match expected {
            Some((token, _)) if token.is_synthetic() || *token == Token::Whitespace => None,
            Some((token, _)) => Some(token.describe().to_string()),
            None => Some("end of input".to_string()),
        })
        .collect();
    let found = err.found().map(|found| describe_found(found, source));

    let mut syntax = SyntaxError::new(SyntaxErrorKind::Unexpected, err.span(), source_loc)
        .with_expected(expected)
        .with_found(found);
    if let Some(rule) = err.label() {
        syntax = syntax.with_rule(rule);
    }
    tracing::debug!(error = %syntax, "recognition failed");
    syntax
}
