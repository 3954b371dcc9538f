//! Configuration loading from rocqstat.toml.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::classify::Classifier;
use crate::error::{IoResultExt, RocqstatError};
use crate::extract::CommentMode;
use crate::options::ScanOptions;

/// File name looked up at the first source root.
pub const CONFIG_FILE_NAME: &str = "rocqstat.toml";

/// Main configuration structure for rocqstat.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RocqstatConfig {
    /// Words that promote a declaration to `primary` when found in its description.
    pub marker_words: Option<Vec<String>>,
    /// Directory names to prune during discovery.
    pub exclude: Option<Vec<String>>,
    /// Use the depth-counting comment stripper instead of the line-local one.
    pub nested_comments: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "markdown", "tsv", "json" or "dot".
    pub format: Option<String>,
}

impl RocqstatConfig {
    /// Builds scan options from this config, falling back to defaults.
    pub fn scan_options(&self) -> ScanOptions {
        let comment_mode = match self.nested_comments {
            Some(true) => CommentMode::Nested,
            _ => CommentMode::LineLocal,
        };
        let classifier = match &self.marker_words {
            Some(words) => Classifier::new(words.iter().cloned()),
            None => Classifier::default(),
        };
        ScanOptions {
            comment_mode,
            classifier,
        }
    }

    /// Configured excluded directory names, empty if unset.
    pub fn excluded_dirs(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }
}

/// Loads configuration from rocqstat.toml under `root` if it exists.
pub fn load_config(root: &Path) -> Result<Option<RocqstatConfig>> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<RocqstatConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    let cfg = toml::from_str(&content).map_err(|e| RocqstatError::config(path, e.to_string()))?;
    Ok(cfg)
}
