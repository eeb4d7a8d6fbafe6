use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Unresolved};
use crate::node::{Key, Node};

/// A normalized data graph: top-level collections keyed by name.
///
/// A collection is usually a table (a mapping from entity id to entity),
/// but the traversal root may be any nested structure. The graph is never
/// mutated by denormalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    collections: IndexMap<String, Node>,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a collection, returning the previous one with that name.
    pub fn insert(&mut self, name: impl Into<String>, collection: impl Into<Node>) -> Option<Node> {
        self.collections.insert(name.into(), collection.into())
    }

    /// Builder-style [`Graph::insert`].
    pub fn with(mut self, name: impl Into<String>, collection: impl Into<Node>) -> Self {
        self.insert(name, collection);
        self
    }

    pub fn collection(&self, name: &str) -> Option<&Node> {
        self.collections.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Default link lookup: `graph[collection][id]`.
    pub fn lookup(&self, collection: &str, id: &Key) -> Result<&Node, Unresolved> {
        let table = self
            .collections
            .get(collection)
            .ok_or(Unresolved::MissingCollection)?;
        let table = table.as_mapping().ok_or(Unresolved::NotATable)?;
        table.get(id).ok_or(Unresolved::MissingId)
    }

    /// [`Graph::lookup`] for a link id of any kind. An id that cannot be a
    /// mapping key (float, sequence, mapping) matches no entity.
    pub fn lookup_id(&self, collection: &str, id: &Node) -> Result<&Node, Unresolved> {
        match id.to_key() {
            Some(key) => self.lookup(collection, &key),
            None => {
                let table = self
                    .collections
                    .get(collection)
                    .ok_or(Unresolved::MissingCollection)?;
                table.as_mapping().ok_or(Unresolved::NotATable)?;
                Err(Unresolved::MissingId)
            }
        }
    }
}

impl TryFrom<Node> for Graph {
    type Error = GraphError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        let map = match node {
            Node::Mapping(map) => map,
            other => return Err(GraphError::NotAMapping(other.kind())),
        };

        let mut collections = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            match key {
                Key::Str(name) => {
                    collections.insert(name, value);
                }
                other => return Err(GraphError::NonStringCollection(other.to_string())),
            }
        }
        Ok(Graph { collections })
    }
}

impl From<Graph> for Node {
    fn from(graph: Graph) -> Self {
        graph
            .collections
            .into_iter()
            .map(|(name, collection)| (Key::Str(name), collection))
            .collect()
    }
}
