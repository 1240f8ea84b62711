//! Command tree node definitions
//!
//! A parsed configuration is a [`Document`]: a synthetic root whose children are
//! the top-level commands. Every other node is a [`CommandNode`] introduced by a
//! [`CommandLine`]. Nodes are either leaves (bare statements) or blocks (a header
//! followed by one or more children, closed in the source by `!`).
//!
//! The tree is read-only once built; the parser is the only producer.

use super::span::Span;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A whitespace-free unit of a command line, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Token(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The tokens of one source line, in order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<Token>,
    span: Span,
}

impl CommandLine {
    pub(crate) fn new(tokens: Vec<Token>, span: Span) -> Self {
        debug_assert!(!tokens.is_empty(), "command lines always carry a token");
        Self { tokens, span }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The command keyword (first token)
    pub fn keyword(&self) -> &str {
        self.tokens[0].as_str()
    }

    /// Location of the line's text in the source, indentation excluded
    pub fn span(&self) -> Span {
        self.span
    }

    /// True when the line's leading tokens equal `prefix`
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.tokens.len()
            && self.tokens.iter().zip(prefix).all(|(token, want)| token == want)
    }

    pub fn token_strs(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::as_str).collect()
    }
}

/// Tokens joined by single spaces
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for CommandLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.tokens)
    }
}

/// Leaf or block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Block,
}

/// One command in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    header: CommandLine,
    children: Vec<CommandNode>,
}

impl CommandNode {
    pub(crate) fn leaf(header: CommandLine) -> Self {
        Self {
            header,
            children: Vec::new(),
        }
    }

    pub(crate) fn block(header: CommandLine, children: Vec<CommandNode>) -> Self {
        debug_assert!(!children.is_empty(), "blocks always have a child");
        Self { header, children }
    }

    pub fn header(&self) -> &CommandLine {
        &self.header
    }

    pub fn tokens(&self) -> &[Token] {
        self.header.tokens()
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn kind(&self) -> NodeKind {
        if self.children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Block
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == NodeKind::Leaf
    }

    pub fn is_block(&self) -> bool {
        self.kind() == NodeKind::Block
    }

    /// First direct child whose header starts with `prefix`
    pub fn find(&self, prefix: &[&str]) -> Option<&CommandNode> {
        find_child(&self.children, prefix)
    }

    /// Iterate over every node below this one, depth-first in source order.
    /// Direct children are reported at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.children)
    }
}

impl Serialize for CommandNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.children.is_empty() { 1 } else { 2 };
        let mut state = serializer.serialize_struct("CommandNode", fields)?;
        state.serialize_field("header", &self.header)?;
        if !self.children.is_empty() {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

/// The synthetic root of a parsed configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct Document {
    children: Vec<CommandNode>,
}

impl Document {
    pub(crate) fn new(children: Vec<CommandNode>) -> Self {
        Self { children }
    }

    /// Top-level commands, in source order
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First top-level command whose header starts with `prefix`
    pub fn find(&self, prefix: &[&str]) -> Option<&CommandNode> {
        find_child(&self.children, prefix)
    }

    /// Descend through one header prefix per level
    ///
    /// `doc.find_path(&[&["fcoe"], &["fabric-map", "default"], &["vlan"]])`
    pub fn find_path(&self, path: &[&[&str]]) -> Option<&CommandNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.find(first)?;
        for prefix in rest {
            node = node.find(prefix)?;
        }
        Some(node)
    }

    /// Every node in the tree, depth-first in source order. Top-level
    /// commands are at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.children)
    }

    pub fn block_count(&self) -> usize {
        self.walk().filter(|(_, node)| node.is_block()).count()
    }

    pub fn leaf_count(&self) -> usize {
        self.walk().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Number of nesting levels: 0 for an empty document, 1 when every
    /// command is top-level.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }
}

fn find_child<'a>(children: &'a [CommandNode], prefix: &[&str]) -> Option<&'a CommandNode> {
    children
        .iter()
        .find(|child| child.header.starts_with(prefix))
}

/// Pre-order iterator returned by [`Document::walk`] and [`CommandNode::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a CommandNode)>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [CommandNode]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CommandNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> CommandLine {
        CommandLine::new(
            text.split_whitespace().map(Token::new).collect(),
            Span::default(),
        )
    }

    fn sample() -> Document {
        Document::new(vec![
            CommandNode::leaf(line("hostname sw1")),
            CommandNode::block(
                line("fcoe"),
                vec![CommandNode::block(
                    line("fabric-map default"),
                    vec![
                        CommandNode::leaf(line("vlan 1002")),
                        CommandNode::leaf(line("fcmap 0E:FC:00")),
                    ],
                )],
            ),
        ])
    }

    #[test]
    fn test_node_kind() {
        let doc = sample();
        assert!(doc.children()[0].is_leaf());
        assert!(doc.children()[1].is_block());
        assert_eq!(doc.children()[1].kind(), NodeKind::Block);
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let doc = sample();
        let visited: Vec<(usize, String)> = doc
            .walk()
            .map(|(depth, node)| (depth, node.header().to_string()))
            .collect();

        assert_eq!(
            visited,
            vec![
                (0, "hostname sw1".to_string()),
                (0, "fcoe".to_string()),
                (1, "fabric-map default".to_string()),
                (2, "vlan 1002".to_string()),
                (2, "fcmap 0E:FC:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_counts_and_depth() {
        let doc = sample();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.leaf_count(), 3);
        assert_eq!(doc.depth(), 3);
        assert_eq!(Document::default().depth(), 0);
    }

    #[test]
    fn test_find_path() {
        let doc = sample();
        let vlan = doc
            .find_path(&[&["fcoe"], &["fabric-map"], &["vlan"]])
            .expect("vlan under fabric-map");
        assert_eq!(vlan.header().token_strs(), vec!["vlan", "1002"]);

        assert!(doc.find_path(&[&["fcoe"], &["map"]]).is_none());
        assert!(doc.find_path(&[]).is_none());
    }

    #[test]
    fn test_starts_with_requires_whole_tokens() {
        let header = line("fabric-map default");
        assert!(header.starts_with(&["fabric-map"]));
        assert!(header.starts_with(&["fabric-map", "default"]));
        assert!(!header.starts_with(&["fabric"]));
        assert!(!header.starts_with(&["fabric-map", "default", "extra"]));
    }

    #[test]
    fn test_serialize_shape() {
        let doc = sample();
        let json = serde_json::to_value(&doc).expect("document serializes");
        assert_eq!(json["children"][0]["header"][0], "hostname");
        assert!(json["children"][0].get("children").is_none());
        assert_eq!(
            json["children"][1]["children"][0]["children"][1]["header"][1],
            "0E:FC:00"
        );
    }
}
