use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ResolverError, Unresolved};
use crate::graph::Graph;
use crate::link::Link;
use crate::node::Node;

/// A custom link resolver: `(type, id, graph) -> entity`.
///
/// The id is passed as written in the link, whatever its kind.
///
/// Resolvers must not mutate the graph. Whatever they return is itself
/// scanned for further links.
pub type ResolverFn = dyn Fn(&str, &Node, &Graph) -> Result<Node, ResolverError> + Send + Sync;

/// Per-type custom resolvers. Types without an entry use the default lookup.
#[derive(Clone, Default)]
pub struct ResolverTable {
    resolvers: HashMap<String, Arc<ResolverFn>>,
}

impl ResolverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolver for a type, replacing any previous one.
    pub fn register<F>(&mut self, kind: impl Into<String>, resolver: F) -> &mut Self
    where
        F: Fn(&str, &Node, &Graph) -> Result<Node, ResolverError> + Send + Sync + 'static,
    {
        self.resolvers.insert(kind.into(), Arc::new(resolver));
        self
    }

    /// Builder-style [`ResolverTable::register`].
    pub fn with<F>(mut self, kind: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&str, &Node, &Graph) -> Result<Node, ResolverError> + Send + Sync + 'static,
    {
        self.register(kind, resolver);
        self
    }

    pub fn get(&self, kind: &str) -> Option<&Arc<ResolverFn>> {
        self.resolvers.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.resolvers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Registered type names, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl fmt::Debug for ResolverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverTable")
            .field("types", &self.types())
            .finish()
    }
}

/// Error from the [`path_prefix`] resolver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathPrefixError {
    #[error("unresolved link {link}: {reason}")]
    Unresolved { link: Link, reason: Unresolved },
    #[error("entity {link} is a {kind}, expected a file name string")]
    NotAString { link: Link, kind: &'static str },
}

/// Resolver that looks the entity up by default and prefixes it with a directory.
///
/// The entity must be a string, e.g. an asset file name: with `dir = "landing_page"`,
/// an entity `"hero.png"` resolves to `"landing_page/hero.png"`.
pub fn path_prefix(
    dir: impl Into<String>,
) -> impl Fn(&str, &Node, &Graph) -> Result<Node, ResolverError> + Send + Sync + 'static {
    let dir = dir.into();
    move |kind: &str, id: &Node, graph: &Graph| -> Result<Node, ResolverError> {
        let link = || Link::new(kind, id.clone());
        let entity = graph
            .lookup_id(kind, id)
            .map_err(|reason| PathPrefixError::Unresolved {
                link: link(),
                reason,
            })?;
        let file = entity.as_str().ok_or_else(|| PathPrefixError::NotAString {
            link: link(),
            kind: entity.kind(),
        })?;
        Ok(Node::from(format!("{}/{}", dir, file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        serde_json::from_value(serde_json::json!({
            "assets": {"myheroimage": "hero.png", "broken": {"path": "x"}},
        }))
        .unwrap()
    }

    #[test]
    fn register_and_get() {
        let mut table = ResolverTable::new();
        assert!(table.is_empty());
        table.register("b", |_, _, _| Ok(Node::null()));
        table.register("a", |_, _, _| Ok(Node::from(1)));
        assert_eq!(table.len(), 2);
        assert!(table.contains("a"));
        assert!(table.get("c").is_none());
        assert_eq!(table.types(), vec!["a", "b"]);

        let resolved = (table.get("a").unwrap())("a", &Node::from(1), &Graph::new()).unwrap();
        assert_eq!(resolved, Node::from(1));
    }

    #[test]
    fn register_replaces_previous() {
        let table = ResolverTable::new()
            .with("a", |_, _, _| Ok(Node::from("old")))
            .with("a", |_, _, _| Ok(Node::from("new")));
        assert_eq!(table.len(), 1);
        let resolved = (table.get("a").unwrap())("a", &Node::from(0), &Graph::new()).unwrap();
        assert_eq!(resolved, Node::from("new"));
    }

    #[test]
    fn debug_lists_types() {
        let table = ResolverTable::new().with("assets", path_prefix("dir"));
        assert_eq!(format!("{:?}", table), r#"ResolverTable { types: ["assets"] }"#);
    }

    #[test]
    fn path_prefix_joins_directory() {
        let resolver = path_prefix("landing_page");
        let resolved = resolver("assets", &Node::from("myheroimage"), &graph()).unwrap();
        assert_eq!(resolved, Node::from("landing_page/hero.png"));
    }

    #[test]
    fn path_prefix_missing_entity() {
        let resolver = path_prefix("landing_page");
        let err = resolver("assets", &Node::from("nope"), &graph()).unwrap_err();
        let err = err.downcast_ref::<PathPrefixError>().unwrap();
        assert_eq!(
            err,
            &PathPrefixError::Unresolved {
                link: Link::new("assets", "nope"),
                reason: Unresolved::MissingId,
            }
        );

        let err = resolver("assets", &Node::from(1.5), &graph()).unwrap_err();
        assert_eq!(err.to_string(), "unresolved link assets/1.5: no entity with that id");
    }

    #[test]
    fn path_prefix_requires_string_entity() {
        let resolver = path_prefix("landing_page");
        let err = resolver("assets", &Node::from("broken"), &graph()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "entity assets/\"broken\" is a mapping, expected a file name string"
        );
    }
}
