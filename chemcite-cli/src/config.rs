//! TOML configuration file support.
//!
//! ```toml
//! # chemcite.toml
//! [parsing]
//! strict = true
//! auto_fix_j = true
//! general_multiplet = false
//! language = "zh"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chemcite::ParseSettings;
use serde::Deserialize;

/// Root configuration structure for chemcite.toml files.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// The parse settings, missing fields take their default value
    #[serde(default)]
    pub(crate) parsing: ParseSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub(crate) fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
