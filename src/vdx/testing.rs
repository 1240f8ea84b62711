//! Fluent assertions for command trees
//!
//! Checking a nested tree by hand means a match or index chain per level. The
//! assertion builders here describe the expected shape instead:
//!
//! ```rust-example
//! use vdxconf::vdx::testing::assert_tree;
//!
//! assert_tree(&doc)
//!     .item_count(1)
//!     .item(0, |fcoe| {
//!         fcoe.assert_block()
//!             .header("fcoe")
//!             .child(0, |map| {
//!                 map.assert_block()
//!                     .header("fabric-map default")
//!                     .child(0, |vlan| {
//!                         vlan.assert_leaf().tokens(&["vlan", "1002"]);
//!                     });
//!             });
//!     });
//! ```
//!
//! Every failure message carries the path to the node, e.g. `items[0].children[1]`.

use crate::vdx::ast::{CommandNode, Document};

/// Create an assertion builder for a document
pub fn assert_tree(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(nodes: &[CommandNode]) -> String {
    nodes
        .iter()
        .map(|node| format!("{:?} `{}`", node.kind(), node.header()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level commands
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.doc.children().len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {} items: [{}]",
            expected,
            actual,
            summarize(self.doc.children())
        );
        self
    }

    /// Assert on a top-level command by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.doc.children();
        assert!(
            index < children.len(),
            "Item index {} out of bounds (document has {} items)",
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("items[{index}]"),
        });
        self
    }

    pub fn block_count(self, expected: usize) -> Self {
        assert_eq!(self.doc.block_count(), expected, "block count");
        self
    }

    pub fn leaf_count(self, expected: usize) -> Self {
        assert_eq!(self.doc.leaf_count(), expected, "leaf count");
        self
    }
}

pub struct NodeAssertion<'a> {
    node: &'a CommandNode,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn assert_leaf(self) -> Self {
        assert!(
            self.node.is_leaf(),
            "{}: Expected leaf, found block `{}` with {} children",
            self.context,
            self.node.header(),
            self.node.children().len()
        );
        self
    }

    pub fn assert_block(self) -> Self {
        assert!(
            self.node.is_block(),
            "{}: Expected block, found leaf `{}`",
            self.context,
            self.node.header()
        );
        self
    }

    /// Assert the header, tokens joined by single spaces
    pub fn header(self, expected: &str) -> Self {
        assert_eq!(
            self.node.header().to_string(),
            expected,
            "{}: header mismatch",
            self.context
        );
        self
    }

    pub fn tokens(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node.header().token_strs(),
            expected,
            "{}: token mismatch",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.node.children())
        );
        self
    }

    /// Assert on a child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}.children[{index}]", self.context),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_shape() {
        let doc = crate::vdx::build("fcoe\n vlan 1002\n!\nhostname sw1\n").expect("builds");
        assert_tree(&doc)
            .item_count(2)
            .block_count(1)
            .leaf_count(2)
            .item(1, |item| {
                item.assert_leaf().tokens(&["hostname", "sw1"]);
            })
            .item(0, |item| {
                item.assert_block()
                    .header("fcoe")
                    .child_count(1)
                    .child(0, |child| {
                        child.assert_leaf().header("vlan 1002");
                    });
            });
    }

    #[test]
    #[should_panic(expected = "items[0]: Expected block")]
    fn test_failure_names_path() {
        let doc = crate::vdx::build("hostname sw1\n").expect("builds");
        assert_tree(&doc).item(0, |item| {
            item.assert_block();
        });
    }
}
