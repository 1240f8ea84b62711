//! Labeled configuration snapshots
//!
//! A switch holds several configurations at once: the one it is running, a
//! candidate being edited, and the original one an edit session started from.
//! A [`ConfigSnapshot`] is a parsed document tagged with which of those it is.

use crate::vdx::ast::Document;
use crate::vdx::error::ParseError;
use crate::vdx::parsing::Parser;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which configuration state a snapshot was taken from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Revision {
    Running,
    Candidate,
    Original,
    /// Any other label, e.g. a saved file name
    Named(String),
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Running => f.write_str("running"),
            Revision::Candidate => f.write_str("candidate"),
            Revision::Original => f.write_str("original"),
            Revision::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Revision {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "running" | "running-config" => Revision::Running,
            "candidate" | "candidate-config" => Revision::Candidate,
            "original" => Revision::Original,
            other => Revision::Named(other.to_string()),
        })
    }
}

/// A parsed configuration and the revision it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    revision: Revision,
    document: Document,
}

impl ConfigSnapshot {
    pub fn new(revision: Revision, document: Document) -> Self {
        Self { revision, document }
    }

    /// Parse `text` with the default configuration and label the result
    pub fn parse(revision: Revision, text: &str) -> Result<Self, ParseError> {
        Self::parse_with(&Parser::default(), revision, text)
    }

    pub fn parse_with(parser: &Parser, revision: Revision, text: &str) -> Result<Self, ParseError> {
        let document = parser.build(text).map_err(|err| {
            tracing::debug!(%revision, error = %err, "snapshot failed to parse");
            err
        })?;
        Ok(Self::new(revision, document))
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
