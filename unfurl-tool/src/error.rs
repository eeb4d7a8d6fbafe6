use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnfurlError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] unfurl_core::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot tell the format of {0}; pass --input-format json|yaml")]
    UnknownFormat(PathBuf),

    #[error("Invalid prefix {0:?}; expected TYPE=DIR")]
    InvalidPrefix(String),

    #[error("Denormalization failed: {0}")]
    Denormalize(#[from] unfurl_core::DenormalizeError),
}
