//! Intermediate Representation for the recognizer
//!
//! The grammar produces a tree of `ParseNode`s that mirrors its rules one to
//! one. It describes what was matched without deciding what the command tree
//! looks like; that is the builder's job.
//!
//! Per node type:
//!
//! | node       | tokens                                   | children              |
//! |------------|------------------------------------------|-----------------------|
//! | `Document` | -                                        | `Item`s               |
//! | `Item`     | -                                        | one `Block` or `Line` |
//! | `Block`    | header indent?, closing indent?, `!`     | `Text`, then `Item`s  |
//! | `Line`     | indent?                                  | one `Text`            |
//! | `Text`     | whitespace between tokens                | `Token`s              |
//! | `Token`    | the token itself                         | -                     |

use crate::vdx::lexing::{Token, TokenLocation};
use std::fmt;
use std::ops::Range;

/// Grammar rule a node was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Item,
    Block,
    Line,
    Text,
    Token,
}

impl NodeType {
    /// Rule name as used in diagnostics
    pub fn rule_name(&self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::Item => "item",
            NodeType::Block => "block",
            NodeType::Line => "line",
            NodeType::Text => "text",
            NodeType::Token => "token",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule_name())
    }
}

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    pub node_type: NodeType,
    /// Byte range the rule matched
    pub span: Range<usize>,
    pub tokens: Vec<TokenLocation>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// Creates a new `ParseNode`.
    pub fn new(
        node_type: NodeType,
        span: Range<usize>,
        tokens: Vec<TokenLocation>,
        children: Vec<ParseNode>,
    ) -> Self {
        Self {
            node_type,
            span,
            tokens,
            children,
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseNode::node_count).sum::<usize>()
    }

    /// Terminators consumed by this subtree
    pub fn terminator_count(&self) -> usize {
        let own = match self.node_type {
            NodeType::Block => self
                .tokens
                .iter()
                .filter(|(token, _)| *token == Token::Terminator)
                .count(),
            _ => 0,
        };
        own + self
            .children
            .iter()
            .map(ParseNode::terminator_count)
            .sum::<usize>()
    }
}

/// Result of [`recognize`](crate::vdx::recognize): the parse tree together with
/// the text it was recognized from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    source: String,
    root: ParseNode,
}

impl ParseTree {
    pub(crate) fn new(source: impl Into<String>, root: ParseNode) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &ParseNode {
        &self.root
    }

    /// Source text a node matched
    pub fn text_of(&self, node: &ParseNode) -> &str {
        self.source.get(node.span.clone()).unwrap_or("")
    }

    /// Block nodes anywhere in the tree
    pub fn block_count(&self) -> usize {
        fn count(node: &ParseNode) -> usize {
            let own = usize::from(node.node_type == NodeType::Block);
            own + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    pub fn terminator_count(&self) -> usize {
        self.root.terminator_count()
    }
}
