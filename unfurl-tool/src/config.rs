use std::path::{Path, PathBuf};

use unfurl_core::DenormalizerConfig;

use crate::error::UnfurlError;

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("unfurl").join("config.toml"))
}

/// Loads the denormalizer config.
///
/// An explicit path must exist and parse. Without one, the user config file is
/// used when present, otherwise defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<DenormalizerConfig, UnfurlError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let Some(path) = config_path() else {
        return Ok(DenormalizerConfig::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "using user config");
            Ok(toml::from_str(&content)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DenormalizerConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses a `TYPE=DIR` prefix flag.
pub fn parse_prefix(raw: &str) -> Result<(String, String), UnfurlError> {
    match raw.split_once('=') {
        Some((kind, dir)) if !kind.is_empty() && !dir.is_empty() => {
            Ok((kind.to_string(), dir.to_string()))
        }
        _ => Err(UnfurlError::InvalidPrefix(raw.to_string())),
    }
}

/// Applies command-line overrides on top of a loaded config.
pub fn resolve_config(
    mut config: DenormalizerConfig,
    root: Option<String>,
    prefixes: &[String],
) -> Result<DenormalizerConfig, UnfurlError> {
    if let Some(root) = root {
        config.root = root;
    }
    for raw in prefixes {
        let (kind, dir) = parse_prefix(raw)?;
        config.prefixes.insert(kind, dir);
    }
    Ok(config)
}
