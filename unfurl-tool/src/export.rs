//! JSON/YAML rendering of denormalized trees and link listings.

use unfurl_core::{Link, Node};

use crate::error::UnfurlError;
use crate::input::Format;

/// Export options.
pub struct ExportOptions {
    /// Whether to pretty print (JSON only).
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Renders a tree as JSON or YAML.
pub fn export(tree: &Node, format: Format, options: &ExportOptions) -> Result<String, UnfurlError> {
    match format {
        Format::Json => {
            let mut out = if options.pretty {
                serde_json::to_string_pretty(tree)?
            } else {
                serde_json::to_string(tree)?
            };
            out.push('\n');
            Ok(out)
        }
        Format::Yaml => Ok(serde_yaml::to_string(tree)?),
    }
}

/// One `type/id` line per link.
pub fn render_links(links: &[Link]) -> String {
    links.iter().map(|link| format!("{}\n", link)).collect()
}
