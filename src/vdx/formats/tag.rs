//! XML-like tag serialization
//!
//! - Leaves become `<leaf>header</leaf>`
//! - Blocks become `<block>header<children>...</children></block>`
//! - Everything sits inside a `<document>` element, indented two spaces per level
//!
//! ```text
//! <document>
//!   <block>fcoe<children>
//!     <leaf>vlan 1002</leaf>
//!   </children></block>
//! </document>
//! ```

use super::registry::{FormatError, Formatter};
use crate::vdx::ast::{CommandNode, Document};

/// Serialize a document to tag format
pub fn serialize_document(doc: &Document) -> String {
    let mut result = String::new();
    result.push_str("<document>\n");
    for node in doc.children() {
        serialize_node(node, 1, &mut result);
    }
    result.push_str("</document>");
    result
}

fn serialize_node(node: &CommandNode, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    let header = escape_xml(&node.header().to_string());

    if node.is_leaf() {
        output.push_str(&format!("{indent}<leaf>{header}</leaf>\n"));
        return;
    }

    output.push_str(&format!("{indent}<block>{header}<children>\n"));
    for child in node.children() {
        serialize_node(child, indent_level + 1, output);
    }
    output.push_str(&format!("{indent}</children></block>\n"));
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Formatter for the `tag` format
#[derive(Debug, Clone, Copy, Default)]
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }

    fn description(&self) -> &str {
        "XML-like tags mirroring the command tree"
    }
}
