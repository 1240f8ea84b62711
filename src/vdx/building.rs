//! Command tree builder from the ParseNode IR
//!
//! [`TreeBuilder`] walks the [`ParseNode`] tree produced by recognition and
//! reduces it bottom-up, one reduction per grammar rule:
//!
//! - `token` - the token text, verbatim
//! - `text` - a [`CommandLine`] of its tokens
//! - `line` - a leaf [`CommandNode`]
//! - `block` - a block [`CommandNode`]; the terminator carries no data
//! - `item` - whatever its single child reduced to
//! - `document` - the [`Document`] of all items
//!
//! A node whose shape does not fit its rule means the grammar and the builder
//! disagree. That is reported as an [`InternalError`], never as a syntax error.

use crate::vdx::ast::{CommandLine, CommandNode, Document, SourceLocation, Token};
use crate::vdx::error::{InternalError, ParseError};
use crate::vdx::lexing;
use crate::vdx::parsing::{NodeType, ParseNode, ParseTree};

/// Result of reducing one node
#[derive(Debug)]
enum Reduced {
    Token(Token),
    Line(CommandLine),
    Node(CommandNode),
    Document(Document),
}

impl Reduced {
    fn describe(&self) -> &'static str {
        match self {
            Reduced::Token(_) => "a token",
            Reduced::Line(_) => "a command line",
            Reduced::Node(_) => "a command",
            Reduced::Document(_) => "a document",
        }
    }
}

/// A builder that constructs the command tree from a `ParseNode` tree.
pub struct TreeBuilder<'a> {
    source: &'a str,
    source_loc: SourceLocation,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            source_loc: SourceLocation::new(source),
        }
    }

    /// Builds a `Document` from a root `ParseNode`.
    pub fn build(&self, root: &ParseNode) -> Result<Document, InternalError> {
        match self.reduce(root)? {
            Reduced::Document(document) => Ok(document),
            other => Err(InternalError::new(
                root.node_type.rule_name(),
                format!("expected a document at the root, got {}", other.describe()),
            )),
        }
    }

    fn reduce(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        match node.node_type {
            NodeType::Token => self.reduce_token(node),
            NodeType::Text => self.reduce_text(node),
            NodeType::Line => self.reduce_line(node),
            NodeType::Block => self.reduce_block(node),
            NodeType::Item => self.reduce_item(node),
            NodeType::Document => self.reduce_document(node),
        }
    }

    fn reduce_token(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        match node.tokens.as_slice() {
            [(token, span)] if token.is_text() => {
                let text = self.source.get(span.clone()).ok_or_else(|| {
                    InternalError::new("token", format!("span {span:?} is outside the source"))
                })?;
                Ok(Reduced::Token(Token::new(text)))
            }
            other => Err(InternalError::new(
                "token",
                format!("expected one command token, got {other:?}"),
            )),
        }
    }

    fn reduce_text(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        if node.children.is_empty() {
            return Err(InternalError::new("text", "no tokens"));
        }
        let tokens = node
            .children
            .iter()
            .map(|child| match self.reduce(child)? {
                Reduced::Token(token) => Ok(token),
                other => Err(mismatch("text", "a token", &other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let span = self.source_loc.range_to_span(&node.span);
        Ok(Reduced::Line(CommandLine::new(tokens, span)))
    }

    fn reduce_line(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        let [text] = node.children.as_slice() else {
            return Err(InternalError::new(
                "line",
                format!("expected one text child, got {}", node.children.len()),
            ));
        };
        let header = self.expect_line("line", text)?;
        Ok(Reduced::Node(CommandNode::leaf(header)))
    }

    fn reduce_block(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        let terminators = node
            .tokens
            .iter()
            .filter(|(token, _)| *token == lexing::Token::Terminator)
            .count();
        if terminators != 1 {
            return Err(InternalError::new(
                "block",
                format!("expected exactly one terminator, got {terminators}"),
            ));
        }

        let Some((header, body)) = node.children.split_first() else {
            return Err(InternalError::new("block", "missing header"));
        };
        if body.is_empty() {
            return Err(InternalError::new("block", "empty body"));
        }

        let header = self.expect_line("block", header)?;
        let children = body
            .iter()
            .map(|child| self.expect_node("block", child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Reduced::Node(CommandNode::block(header, children)))
    }

    fn reduce_item(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        match node.children.as_slice() {
            [child] => self.reduce(child),
            children => Err(InternalError::new(
                "item",
                format!("expected one child, got {}", children.len()),
            )),
        }
    }

    fn reduce_document(&self, node: &ParseNode) -> Result<Reduced, InternalError> {
        let children = node
            .children
            .iter()
            .map(|child| self.expect_node("document", child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Reduced::Document(Document::new(children)))
    }

    fn expect_line(&self, rule: &'static str, node: &ParseNode) -> Result<CommandLine, InternalError> {
        match self.reduce(node)? {
            Reduced::Line(line) => Ok(line),
            other => Err(mismatch(rule, "a command line", &other)),
        }
    }

    fn expect_node(&self, rule: &'static str, node: &ParseNode) -> Result<CommandNode, InternalError> {
        match self.reduce(node)? {
            Reduced::Node(command) => Ok(command),
            other => Err(mismatch(rule, "a command", &other)),
        }
    }
}

fn mismatch(rule: &'static str, wanted: &str, got: &Reduced) -> InternalError {
    InternalError::new(rule, format!("expected {wanted}, got {}", got.describe()))
}

/// Reduce an already recognized tree without recognizing its source again
pub fn build_from_tree(tree: &ParseTree) -> Result<Document, ParseError> {
    let document = TreeBuilder::new(tree.source()).build(tree.root())?;
    tracing::debug!(
        blocks = document.block_count(),
        leaves = document.leaf_count(),
        "built command tree"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdx::lexing::Token as Lexed;
    use std::ops::Range;

    fn word(span: Range<usize>) -> ParseNode {
        ParseNode::new(NodeType::Token, span.clone(), vec![(Lexed::Word, span)], vec![])
    }

    fn text(spans: Vec<Range<usize>>) -> ParseNode {
        let start = spans.first().map_or(0, |s| s.start);
        let end = spans.last().map_or(0, |s| s.end);
        ParseNode::new(NodeType::Text, start..end, vec![], spans.into_iter().map(word).collect())
    }

    fn item(child: ParseNode) -> ParseNode {
        ParseNode::new(NodeType::Item, child.span.clone(), vec![], vec![child])
    }

    fn document(items: Vec<ParseNode>) -> ParseNode {
        ParseNode::new(NodeType::Document, 0..0, vec![], items)
    }

    #[test]
    fn test_reduces_block_with_leaf() {
        let source = "fcoe\n vlan 1\n!";
        let line = ParseNode::new(NodeType::Line, 5..12, vec![], vec![text(vec![6..10, 11..12])]);
        let block = ParseNode::new(
            NodeType::Block,
            0..14,
            vec![(Lexed::Terminator, 13..14)],
            vec![text(vec![0..4]), item(line)],
        );
        let doc = TreeBuilder::new(source)
            .build(&document(vec![item(block)]))
            .expect("builds");

        let fcoe = &doc.children()[0];
        assert!(fcoe.is_block());
        assert_eq!(fcoe.header().keyword(), "fcoe");
        assert_eq!(fcoe.children()[0].header().token_strs(), vec!["vlan", "1"]);
        assert_eq!(fcoe.children()[0].header().span().start.line, 1);
    }

    #[test]
    fn test_text_without_tokens_is_internal_error() {
        let source = "x";
        let empty_text = ParseNode::new(NodeType::Text, 0..0, vec![], vec![]);
        let line = ParseNode::new(NodeType::Line, 0..0, vec![], vec![empty_text]);
        let err = TreeBuilder::new(source)
            .build(&document(vec![item(line)]))
            .unwrap_err();
        assert_eq!(err.rule, "text");
        assert_eq!(err.message, "no tokens");
    }

    #[test]
    fn test_block_without_terminator_is_internal_error() {
        let source = "a\nb";
        let line = ParseNode::new(NodeType::Line, 2..3, vec![], vec![text(vec![2..3])]);
        let block = ParseNode::new(NodeType::Block, 0..3, vec![], vec![text(vec![0..1]), item(line)]);
        let err = TreeBuilder::new(source)
            .build(&document(vec![item(block)]))
            .unwrap_err();
        assert_eq!(err.rule, "block");
    }

    #[test]
    fn test_wrong_child_shape_is_internal_error() {
        let source = "a";
        // A document whose item holds a bare token instead of a line
        let err = TreeBuilder::new(source)
            .build(&document(vec![item(word(0..1))]))
            .unwrap_err();
        assert_eq!(err.rule, "document");
        assert!(err.message.contains("got a token"));
    }

    #[test]
    fn test_root_must_be_document() {
        let source = "a";
        let err = TreeBuilder::new(source).build(&text(vec![0..1])).unwrap_err();
        assert!(err.message.contains("expected a document"));
    }

    #[test]
    fn test_build_from_recognized_tree() {
        let tree = crate::vdx::recognize("cee-map default\n priority 1\n!\n").expect("recognizes");
        let doc = build_from_tree(&tree).expect("builds");
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.leaf_count(), 1);
    }
}
