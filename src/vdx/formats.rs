//! Output formats for command trees
//!
//! - `config` - configuration text with `!` terminators ([`config_text`])
//! - `treeviz` - box-drawing tree view
//! - `tag` - XML-like tags
//! - `json` / `yaml` - serde serialization of the tree
//!
//! All of them are reachable by name through [`FormatRegistry`].

pub mod config_text;
pub mod registry;
pub mod serde_formats;
pub mod tag;
pub mod treeviz;

pub use config_text::{render, to_config_string, ConfigTextFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use tag::{serialize_document as to_tag_str, TagFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
