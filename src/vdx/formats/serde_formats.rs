//! JSON and YAML output through serde
//!
//! Commands serialize as `{ "header": [tokens...] }`, plus `"children"` for
//! blocks. The document is `{ "children": [...] }`.

use super::registry::{FormatError, Formatter};
use crate::vdx::ast::Document;

/// Formatter for the `json` format (pretty-printed)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Command tree as JSON"
    }
}

/// Formatter for the `yaml` format
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Command tree as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let doc = crate::vdx::build("cee-map default\n priority 1\n!\n").expect("builds");
        let json = JsonFormatter.serialize(&doc).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!({
                "children": [
                    {
                        "header": ["cee-map", "default"],
                        "children": [{ "header": ["priority", "1"] }]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_yaml_lists_tokens() {
        let doc = crate::vdx::build("hostname sw1\n").expect("builds");
        let yaml = YamlFormatter.serialize(&doc).expect("serializes");
        assert!(yaml.starts_with("children:"));
        assert!(yaml.contains("- hostname"));
        assert!(yaml.contains("- sw1"));
    }
}
