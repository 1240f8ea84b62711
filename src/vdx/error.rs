//! Error types for recognition and tree building
//!
//! Parsing either yields a complete [`Document`](crate::vdx::ast::Document) or a
//! single [`ParseError`] describing the first point of failure:
//!
//! - [`SyntaxError`] - the input does not match the grammar. Always located.
//!   Unterminated blocks and excessive nesting are kinds of syntax error.
//! - [`InternalError`] - the recognizer and the builder disagree about the shape
//!   of a parse tree. This is a bug, never a property of the input.

use crate::vdx::ast::{Position, SourceLocation};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::NoColor;
use std::fmt;
use std::ops::Range;

/// Where an error occurred: byte offset plus zero-based line/column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub position: Position,
}

impl Location {
    pub fn new(offset: usize, source_loc: &SourceLocation) -> Self {
        Self {
            offset,
            position: source_loc.byte_to_position(offset),
        }
    }

    /// One-based line number, as editors show it
    pub fn line_number(&self) -> usize {
        self.position.line + 1
    }

    /// One-based column number
    pub fn column_number(&self) -> usize {
        self.position.column + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}",
            self.line_number(),
            self.column_number()
        )
    }
}

/// What kind of syntax error occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No grammar alternative matched at this point
    Unexpected,
    /// A header and its body were found but input ended before the `!`
    UnterminatedBlock { header: String },
    /// Blocks nest deeper than the configured limit
    DepthExceeded { limit: usize },
}

/// Recognition failure with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    location: Location,
    span: Range<usize>,
    rule: Option<&'static str>,
    expected: Vec<String>,
    found: Option<String>,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, span: Range<usize>, source_loc: &SourceLocation) -> Self {
        Self {
            kind,
            location: Location::new(span.start, source_loc),
            span,
            rule: None,
            expected: Vec::new(),
            found: None,
        }
    }

    pub(crate) fn unterminated_block(
        header: String,
        span: Range<usize>,
        source_loc: &SourceLocation,
    ) -> Self {
        Self::new(SyntaxErrorKind::UnterminatedBlock { header }, span, source_loc)
            .with_rule("block")
            .with_expected(vec!["terminator `!`".to_string()])
    }

    pub(crate) fn depth_exceeded(
        limit: usize,
        span: Range<usize>,
        source_loc: &SourceLocation,
    ) -> Self {
        Self::new(SyntaxErrorKind::DepthExceeded { limit }, span, source_loc).with_rule("block")
    }

    pub(crate) fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    pub(crate) fn with_expected(mut self, mut expected: Vec<String>) -> Self {
        expected.sort();
        expected.dedup();
        self.expected = expected;
        self
    }

    pub(crate) fn with_found(mut self, found: Option<String>) -> Self {
        self.found = found;
        self
    }

    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Byte range of the offending input
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Grammar rule being attempted, when known
    pub fn rule(&self) -> Option<&'static str> {
        self.rule
    }

    /// What the grammar would have accepted at this point
    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    /// What was found instead; `None` means end of input
    pub fn found(&self) -> Option<&str> {
        self.found.as_deref()
    }

    pub fn is_unterminated_block(&self) -> bool {
        matches!(self.kind, SyntaxErrorKind::UnterminatedBlock { .. })
    }

    /// The message without its location prefix
    pub fn message(&self) -> String {
        match &self.kind {
            SyntaxErrorKind::UnterminatedBlock { header } => {
                format!("block `{header}` is never closed: expected `!` before end of input")
            }
            SyntaxErrorKind::DepthExceeded { limit } => {
                format!("blocks nest deeper than the maximum depth of {limit}")
            }
            SyntaxErrorKind::Unexpected => {
                let found = self.found.as_deref().unwrap_or("end of input");
                let mut message = if self.found.as_deref() == Some("`!`") {
                    format!("unexpected {found}: no open block to close")
                } else {
                    format!("unexpected {found}")
                };
                if !self.expected.is_empty() {
                    message.push_str(&format!(", expected {}", self.expected.join(" or ")));
                }
                if let Some(rule) = self.rule {
                    message.push_str(&format!(" (in {rule})"));
                }
                message
            }
        }
    }

    /// Convert to a codespan-reporting diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<()> {
        let label = match &self.kind {
            SyntaxErrorKind::UnterminatedBlock { .. } => "block opened here",
            SyntaxErrorKind::DepthExceeded { .. } => "this block is too deep",
            SyntaxErrorKind::Unexpected => "unexpected input",
        };
        let mut diagnostic = Diagnostic::error()
            .with_message(self.message())
            .with_labels(vec![Label::primary((), self.span.clone()).with_message(label)]);
        if self.is_unterminated_block() {
            diagnostic = diagnostic.with_notes(vec![
                "every block header must be closed by a line holding only `!`".to_string(),
            ]);
        }
        diagnostic
    }

    /// Render the error against its source as a plain-text report with a
    /// source snippet. Falls back to the one-line form if rendering fails.
    pub fn report(&self, name: &str, source: &str) -> String {
        let file = SimpleFile::new(name, source);
        let mut writer = NoColor::new(Vec::new());
        let config = term::Config::default();
        match term::emit_to_write_style(&mut writer, &config, &file, &self.to_diagnostic()) {
            Ok(()) => String::from_utf8_lossy(&writer.into_inner()).into_owned(),
            Err(_) => format!("{name}: {self}"),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message())
    }
}

impl std::error::Error for SyntaxError {}

/// A parse tree shape the builder has no reduction for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    pub rule: &'static str,
    pub message: String,
}

impl InternalError {
    pub(crate) fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "internal error while reducing `{}`: {}",
            self.rule, self.message
        )
    }
}

impl std::error::Error for InternalError {}

/// Any failure of [`recognize`](crate::vdx::recognize) or [`build`](crate::vdx::build)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Syntax(SyntaxError),
    Internal(InternalError),
}

impl ParseError {
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(err) => Some(err),
            ParseError::Internal(_) => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(err) => write!(f, "syntax error at {err}"),
            ParseError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Syntax(err) => Some(err),
            ParseError::Internal(err) => Some(err),
        }
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        ParseError::Internal(err)
    }
}
