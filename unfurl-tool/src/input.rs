//! Loading normalized graphs from JSON or YAML files.

use std::path::Path;

use clap::ValueEnum;
use unfurl_core::Graph;

use crate::error::UnfurlError;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Parses a normalized graph.
pub fn parse_graph(content: &str, format: Format) -> Result<Graph, UnfurlError> {
    Ok(match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    })
}

/// Reads a normalized graph from a file, detecting the format unless given.
pub fn load_graph(path: &Path, format: Option<Format>) -> Result<Graph, UnfurlError> {
    let format = format
        .or_else(|| Format::from_path(path))
        .ok_or_else(|| UnfurlError::UnknownFormat(path.to_path_buf()))?;

    let content = std::fs::read_to_string(path)?;
    let graph = parse_graph(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        collections = graph.len(),
        "loaded normalized graph"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfurl_core::{Key, Node};

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.YML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.txt")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn yaml_keeps_integer_keys() {
        let graph = parse_graph(
            "composition:\n  - cat: {type: categories, id: 123}\ncategories:\n  123: Bikes\n",
            Format::Yaml,
        )
        .unwrap();
        assert_eq!(
            graph.lookup("categories", &Key::Int(123)),
            Ok(&Node::from("Bikes"))
        );
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, r#"{"composition": [], "assets": {"a": "a.png"}}"#).unwrap();

        let graph = load_graph(&path, None).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains("assets"));
    }

    #[test]
    fn unknown_extension_needs_explicit_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.data");
        std::fs::write(&path, "composition: []\n").unwrap();

        assert!(matches!(
            load_graph(&path, None),
            Err(UnfurlError::UnknownFormat(_))
        ));
        assert!(load_graph(&path, Some(Format::Yaml)).is_ok());
    }
}
