//! Configuration for parsing and rendering
//!
//! `defaults/vdx.default.toml` is embedded into the crate so the documented
//! defaults and the runtime defaults can't drift apart. Callers layer their own
//! files and overrides on top with [`Loader`] before deserializing into
//! [`VdxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/vdx.default.toml");

/// Default nesting limit for blocks
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard cap on `max_depth`; the grammar and the tree builder recurse once per level
pub const MAX_DEPTH_CEILING: usize = 256;

/// Everything configurable in the crate
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VdxConfig {
    pub parser: ParserConfig,
    pub render: RenderConfig,
}

/// Recognition limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Deepest accepted block nesting; top-level blocks are at depth 1
    pub max_depth: usize,
}

impl ParserConfig {
    /// The nesting limit actually enforced: `max_depth`, capped at [`MAX_DEPTH_CEILING`]
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Knobs for the `config` output format
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Spaces per nesting level
    pub indent_width: usize,
    pub blank_line_between_blocks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 1,
            blank_line_between_blocks: false,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. a config section embedded in another document.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override such as `parser.max_depth`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<VdxConfig, ConfigError> {
        let mut config: VdxConfig = self.builder.build()?.try_deserialize()?;
        if config.parser.max_depth > MAX_DEPTH_CEILING {
            tracing::warn!(
                requested = config.parser.max_depth,
                ceiling = MAX_DEPTH_CEILING,
                "parser.max_depth above ceiling, clamping"
            );
            config.parser.max_depth = MAX_DEPTH_CEILING;
        }
        tracing::debug!(
            max_depth = config.parser.max_depth,
            indent_width = config.render.indent_width,
            "loaded configuration"
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<VdxConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_code_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, VdxConfig::default());
        assert_eq!(config.parser.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.max_depth", 8i64)
            .expect("override to apply")
            .set_override("render.blank_line_between_blocks", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_depth, 8);
        assert!(config.render.blank_line_between_blocks);
        assert_eq!(config.render.indent_width, 1);
    }

    #[test]
    fn clamps_max_depth_to_ceiling() {
        let config = Loader::new()
            .with_toml_str("[parser]\nmax_depth = 1000000\n")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_depth, MAX_DEPTH_CEILING);

        let unbounded = ParserConfig {
            max_depth: usize::MAX,
        };
        assert_eq!(unbounded.depth_limit(), MAX_DEPTH_CEILING);
        assert_eq!(ParserConfig::default().depth_limit(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn layers_toml_text() {
        let config = Loader::new()
            .with_toml_str("[render]\nindent_width = 2\n")
            .build()
            .expect("config to build");
        assert_eq!(config.render.indent_width, 2);
        assert_eq!(config.parser.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/vdxconf.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, VdxConfig::default());
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new().with_file("/nonexistent/vdxconf.toml").build();
        assert!(result.is_err());
    }
}
