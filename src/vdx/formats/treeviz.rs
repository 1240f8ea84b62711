//! Treeviz formatter for command trees
//!
//! One line per command, drawn with box connectors:
//!
//! ```text
//! ├─ leaf: hostname sw1
//! └─ block: fcoe
//!   └─ block: fabric-map default
//!     └─ leaf: vlan 1002
//! ```

use super::registry::{FormatError, Formatter};
use crate::vdx::ast::{CommandNode, Document, NodeKind};

const MAX_LABEL_CHARS: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    append_children(&mut result, doc.children(), "");
    result
}

fn append_node(result: &mut String, node: &CommandNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let kind = match node.kind() {
        NodeKind::Leaf => "leaf",
        NodeKind::Block => "block",
    };
    let label = truncate(&node.header().to_string(), MAX_LABEL_CHARS);

    result.push_str(&format!("{prefix}{connector} {kind}: {label}\n"));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[CommandNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}

/// Formatter for the `treeviz` format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Tree of commands drawn with box connectors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_sibling_prefixes() {
        let doc = crate::vdx::build("a\n b\n  c\n !\n d\n!\ne\n").expect("builds");
        assert_eq!(
            to_treeviz_str(&doc),
            "├─ block: a\n│ ├─ block: b\n│ │ └─ leaf: c\n│ └─ leaf: d\n└─ leaf: e\n"
        );
    }
}
