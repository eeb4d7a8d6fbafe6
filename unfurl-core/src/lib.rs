//! Unfurl expands normalized data graphs into nested trees.
//!
//! Core concepts:
//! - **Node**: a nested value (mapping, sequence or scalar)
//! - **Graph**: a normalized data graph, collections of entities keyed by id
//! - **Link**: a `{type, id}` mapping standing in for an entity
//! - **Resolver**: a per-type function overriding the default `graph[type][id]` lookup
//! - **Denormalizer**: walks `graph[root]` and replaces every link with its entity, recursively
//!
//! # Example
//!
//! ```
//! use unfurl_core::{path_prefix, Denormalizer, Graph, Node};
//!
//! let graph: Graph = serde_json::from_str(r#"{
//!     "sections": {"hero1": {"kind": "hero", "background_image": {"type": "assets", "id": "img1"}}},
//!     "composition": [{"section": {"type": "sections", "id": "hero1"}, "disabled": false}],
//!     "assets": {"img1": "hero.png"}
//! }"#).unwrap();
//!
//! let denormalizer = Denormalizer::default().with_resolver("assets", path_prefix("dir"));
//! let tree = denormalizer.to_tree(&graph).unwrap();
//!
//! let section = &tree.as_sequence().unwrap()[0].get("section").unwrap();
//! assert_eq!(section.get("background_image"), Some(&Node::from("dir/hero.png")));
//! ```
//!
//! # Scope
//!
//! Reference cycles are not detected: a link chain that leads back to itself
//! recurses without bound. Resolved entities are not cached between links.

mod config;
mod denormalizer;
mod error;
mod graph;
mod link;
pub mod map;
mod node;
mod resolver;

pub use config::{validate_config, DenormalizerConfig, DEFAULT_ROOT};
pub use denormalizer::Denormalizer;
pub use error::{
    ConfigError, DenormalizeError, DenormalizeResult, GraphError, ResolverError, Unresolved,
};
pub use graph::Graph;
pub use link::{collect_links, Link, Malformed, ID_FIELD, TYPE_FIELD};
pub use map::{deep_map, try_deep_map, visit_entries, EntryMapper};
pub use node::{Key, Mapping, Node, Scalar};
pub use resolver::{path_prefix, PathPrefixError, ResolverFn, ResolverTable};
