//! CLI configuration.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. `~/.config/tdm/config.yaml`, or the file given with `--config`
//! 3. Environment variables (`TDM_DEVICE`, `TDM_LOG`)
//! 4. CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON on stdout.
    Json,
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default device spec path for `tdm check`.
    #[serde(default)]
    pub device: Option<PathBuf>,

    /// Log filter used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: None,
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Apply environment variable overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("TDM_DEVICE") {
            self.device = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("TDM_LOG") {
            self.log_level = val;
        }
    }
}

/// `~/.config/tdm/config.yaml`, if the home directory is known.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("tdm").join("config.yaml"))
}
