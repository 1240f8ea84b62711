//! Recognition of configuration text
//!
//! Processing runs in two phases:
//!
//! 1. **Recognition**: lexing plus the chumsky grammar, producing a
//!    [`ParseTree`] of [`ParseNode`]s that mirrors the grammar rules.
//! 2. **Building**: reduction of that tree into a
//!    [`Document`](crate::vdx::ast::Document), see [`crate::vdx::building`].
//!
//! [`Parser`] runs both phases with a given [`ParserConfig`]. The free
//! functions [`crate::vdx::recognize`] and [`crate::vdx::build`] use the default
//! configuration.

pub mod grammar;
pub mod ir;

pub use ir::{NodeType, ParseNode, ParseTree};

use crate::vdx::ast::Document;
use crate::vdx::building::build_from_tree;
use crate::vdx::config::ParserConfig;
use crate::vdx::error::ParseError;
use crate::vdx::lexing::lex;

/// Configured recognizer and builder. Holds no state between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Run the grammar over `source` without building the command tree
    pub fn recognize(&self, source: &str) -> Result<ParseTree, ParseError> {
        let tokens = lex(source, &self.config)?;
        tracing::trace!(tokens = tokens.len(), "recognizing");
        let root = grammar::parse_tokens(tokens, source)?;
        tracing::debug!(
            items = root.children.len(),
            nodes = root.node_count(),
            "recognized document"
        );
        Ok(ParseTree::new(source, root))
    }

    /// Recognize `source` and reduce it to a [`Document`]
    pub fn build(&self, source: &str) -> Result<Document, ParseError> {
        let tree = self.recognize(source)?;
        build_from_tree(&tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_keeps_source() {
        let tree = Parser::default().recognize("hostname sw1\n").expect("recognizes");
        assert_eq!(tree.source(), "hostname sw1\n");
        assert_eq!(tree.root().node_type, NodeType::Document);
        assert_eq!(tree.root().span, 0..13);
    }

    #[test]
    fn test_configured_depth() {
        let source = "a\n b\n  c\n !\n!\n";
        let shallow = Parser::new(ParserConfig { max_depth: 1 });
        let err = shallow.build(source).unwrap_err();
        assert!(err.to_string().contains("maximum depth of 1"));

        let doc = Parser::default().build(source).expect("builds");
        assert_eq!(doc.depth(), 3);
    }
}
