//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration comes in up to
//! two layers, later ones winning key by key:
//!
//! 1. `<source>/config.toml`, if present
//! 2. the file passed with `--config`, which must exist
//!
//! Keys set in neither layer keep their defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! split_sequence = "-----"   # Separates the metadata header from the HTML body
//! source_extension = ".html" # Files ending with this are parsed as pages
//! append_html = false        # Renderers add .html to internal links
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the source root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Delimiter between the metadata header and the body. Must appear
    /// verbatim in every source file; the first occurrence splits.
    pub split_sequence: String,
    /// Suffix identifying source files. Stripped when deriving page ids.
    pub source_extension: String,
    /// Whether renderers append `.html` to internal links. Carried on the
    /// finished [`crate::Site`]; the graph itself does not change.
    pub append_html: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            split_sequence: "-----".to_string(),
            source_extension: ".html".to_string(),
            append_html: false,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split_sequence.is_empty() {
            return Err(ConfigError::Validation(
                "split_sequence must not be empty".into(),
            ));
        }
        if self.split_sequence.contains('\n') {
            return Err(ConfigError::Validation(
                "split_sequence must be a single line".into(),
            ));
        }
        if self.source_extension.is_empty() {
            return Err(ConfigError::Validation(
                "source_extension must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Layered loading
// =============================================================================

fn read_layer(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the configuration for the source tree at `root`.
///
/// `explicit` is the `--config` file. It is layered over
/// `<root>/config.toml` and fails with [`ConfigError::Io`] when missing.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let mut merged = toml::Table::new();

    let source_config = root.join(CONFIG_FILE);
    if source_config.exists() {
        tracing::debug!(path = %source_config.display(), "Loading config layer");
        merged.extend(read_layer(&source_config)?);
    }
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "Loading config layer");
        merged.extend(read_layer(path)?);
    }

    let config: SiteConfig = toml::Value::Table(merged).try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented stock `config.toml`. Printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# sitegraph configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.
#
# <source>/config.toml is read first; a file given with --config is layered
# on top of it, key by key.

# Separates the metadata header from the HTML body in every source file.
# Only the first occurrence splits; later occurrences belong to the body.
split_sequence = "-----"

# Files whose names end with this suffix are parsed as pages. The suffix is
# stripped to form the page id: news/item.html -> news/item
source_extension = ".html"

# Ask renderers to append .html to internal links (for hosts that do not
# resolve extensionless URLs). Also enabled by the --append-html flag.
append_html = false
"##
}
