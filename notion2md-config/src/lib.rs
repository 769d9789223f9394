//! Shared configuration loader for notion2md.
//!
//! `defaults/notion2md.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`Notion2mdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use notion2md_render::{CaptionMode, RenderOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/notion2md.default.toml");

/// File picked up from the working directory when present
pub const LOCAL_CONFIG_FILE: &str = "notion2md.toml";

/// Top-level configuration consumed by notion2md applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Notion2mdConfig {
    pub render: RenderConfig,
    pub export: ExportConfig,
}

/// Mirrors the knobs exposed by the Markdown renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub list_delimiter: String,
    pub indent_string: String,
    pub image_caption: CaptionMode,
    pub strip_meta_chars: String,
}

/// Batch export locations and file naming.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub extension: String,
    pub json_dir: PathBuf,
    pub md_dir: PathBuf,
}

impl From<&Notion2mdConfig> for RenderOptions {
    fn from(config: &Notion2mdConfig) -> Self {
        RenderOptions {
            list_delimiter: config.render.list_delimiter.clone(),
            indent_string: config.render.indent_string.clone(),
            image_caption: config.render.image_caption,
            strip_meta_chars: config.render.strip_meta_chars.clone(),
            extension: config.export.extension.clone(),
        }
    }
}

impl From<Notion2mdConfig> for RenderOptions {
    fn from(config: Notion2mdConfig) -> Self {
        RenderOptions {
            list_delimiter: config.render.list_delimiter,
            indent_string: config.render.indent_string,
            image_caption: config.render.image_caption,
            strip_meta_chars: config.render.strip_meta_chars,
            extension: config.export.extension,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<Notion2mdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Notion2mdConfig, ConfigError> {
    Loader::new().build()
}
