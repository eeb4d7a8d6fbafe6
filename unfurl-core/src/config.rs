//! Denormalizer configuration.
//!
//! The core crate never reads files or environment variables; callers load
//! a [`DenormalizerConfig`] however they like (the `unfurl` tool uses TOML)
//! and hand it over explicitly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root collection used when none is configured.
pub const DEFAULT_ROOT: &str = "composition";

/// Serializable denormalizer settings.
///
/// ```toml
/// root = "composition"
///
/// [prefixes]
/// assets = "landing_page"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenormalizerConfig {
    /// Collection used as the traversal seed.
    pub root: String,
    /// Types resolved by prefixing the looked-up entity with a directory.
    pub prefixes: IndexMap<String, String>,
}

impl Default for DenormalizerConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            prefixes: IndexMap::new(),
        }
    }
}

/// Validate a configuration before building a denormalizer from it.
pub fn validate_config(cfg: &DenormalizerConfig) -> Result<(), ConfigError> {
    if cfg.root.is_empty() {
        return Err(ConfigError::EmptyRoot);
    }

    for (kind, dir) in &cfg.prefixes {
        if kind.is_empty() {
            return Err(ConfigError::EmptyPrefixType);
        }
        if dir.is_empty() {
            return Err(ConfigError::EmptyPrefix(kind.clone()));
        }
    }

    Ok(())
}
