//! Configuration text rendering
//!
//! Writes a command tree back out in the dialect it was parsed from: one
//! command per line, children indented one level deeper than their header,
//! every block closed by a `!` at the header's indentation.
//!
//! ```text
//! fcoe
//!  fabric-map default
//!   vlan 1002
//!  !
//! !
//! ```
//!
//! Tokens are joined by single spaces; original spacing is not preserved.

use super::registry::{FormatError, Formatter};
use crate::vdx::ast::{CommandNode, Document};
use crate::vdx::config::RenderConfig;

/// Render with the given layout settings
pub fn render(doc: &Document, config: &RenderConfig) -> String {
    let mut output = String::new();
    for node in doc.children() {
        render_node(node, 0, config, &mut output);
        if node.is_block() && config.blank_line_between_blocks {
            output.push('\n');
        }
    }
    output
}

/// Render with the default layout: single-space indentation, no blank lines
pub fn to_config_string(doc: &Document) -> String {
    render(doc, &RenderConfig::default())
}

fn render_node(node: &CommandNode, depth: usize, config: &RenderConfig, output: &mut String) {
    let indent = " ".repeat(depth * config.indent_width);
    output.push_str(&indent);
    output.push_str(&node.header().to_string());
    output.push('\n');

    if node.is_block() {
        for child in node.children() {
            render_node(child, depth + 1, config, output);
        }
        output.push_str(&indent);
        output.push_str("!\n");
    }
}

/// Formatter for the `config` format
#[derive(Debug, Clone, Default)]
pub struct ConfigTextFormatter {
    config: RenderConfig,
}

impl ConfigTextFormatter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Formatter for ConfigTextFormatter {
    fn name(&self) -> &str {
        "config"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(render(doc, &self.config))
    }

    fn description(&self) -> &str {
        "Configuration text with `!` block terminators"
    }
}
