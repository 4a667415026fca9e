// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for focusbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FocusbotError>;

/// Main error type for focusbot
#[derive(Error, Debug)]
pub enum FocusbotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
}

/// Rejection of a syntax-tree node that does not have the shape of a JSX
/// opening element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("expected a JSXOpeningElement node, found {0}")]
    NotAnElement(String),

    #[error("malformed element node: {0}")]
    MalformedNode(String),

    #[error("not a syntax tree: {0}")]
    NotATree(String),
}
