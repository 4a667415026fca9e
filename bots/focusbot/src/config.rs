// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for focusbot

use crate::error::{FocusbotError, Result};
use crate::rule::RuleOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shared JSX settings consumed by the tag resolver
    #[serde(default)]
    pub settings: Settings,

    /// Options object handed to the onclick-has-focus rule
    #[serde(default)]
    pub rule: RuleOptions,

    /// Which files the scanner picks up
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// JSX settings shared by every rule.
///
/// `components` maps custom component names onto the DOM element they
/// render, so `<Button onClick={f} />` is judged as a `<button>`.
/// `polymorphic_prop_name` names a prop (usually `as`) whose static string
/// value overrides the literal tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polymorphic_prop_name: Option<String>,

    /// Literal tags allowed to be renamed through the polymorphic prop
    /// (empty = every tag)
    #[serde(default)]
    pub polymorphic_allow_list: Vec<String>,

    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File name suffixes holding serialized syntax trees
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped while walking
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["ast.json".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "coverage".to_string(),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|e| e == "toml").unwrap_or(false)
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if is_toml(path) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Get the default config path for a repository
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".focusbot/config.yml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if is_toml(path) {
        toml::to_string_pretty(&config).map_err(|e| FocusbotError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
