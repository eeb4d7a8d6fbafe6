use crate::config::{validate_config, DenormalizerConfig, DEFAULT_ROOT};
use crate::error::{ConfigError, DenormalizeError, DenormalizeResult, ResolverError};
use crate::graph::Graph;
use crate::link::Link;
use crate::map::{try_deep_map, EntryMapper};
use crate::node::{Key, Node};
use crate::resolver::{path_prefix, ResolverTable};

/// Expands a normalized graph into a nested tree by replacing links with
/// the entities they point to.
///
/// Configuration is fixed at construction; a single denormalizer can be
/// shared across threads and reused for any number of graphs.
#[derive(Debug, Clone)]
pub struct Denormalizer {
    root: String,
    resolvers: ResolverTable,
}

impl Denormalizer {
    pub fn new(root: impl Into<String>, resolvers: ResolverTable) -> Self {
        Denormalizer {
            root: root.into(),
            resolvers,
        }
    }

    /// Builds a denormalizer from a validated configuration.
    ///
    /// Every `prefixes` entry registers a [`path_prefix`] resolver.
    pub fn from_config(cfg: &DenormalizerConfig) -> Result<Self, ConfigError> {
        validate_config(cfg)?;
        let mut resolvers = ResolverTable::new();
        for (kind, dir) in &cfg.prefixes {
            resolvers.register(kind.clone(), path_prefix(dir.clone()));
        }
        Ok(Denormalizer::new(cfg.root.clone(), resolvers))
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_resolver<F>(mut self, kind: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&str, &Node, &Graph) -> Result<Node, ResolverError> + Send + Sync + 'static,
    {
        self.resolvers.register(kind, resolver);
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn resolvers(&self) -> &ResolverTable {
        &self.resolvers
    }

    /// Denormalizes `graph[root]`.
    ///
    /// Every link found as a mapping value is replaced by its entity, and the
    /// entity is scanned for links in turn. Fails on the first malformed or
    /// unresolvable link; no partial tree is returned.
    pub fn to_tree(&self, graph: &Graph) -> DenormalizeResult<Node> {
        let seed = graph
            .collection(&self.root)
            .ok_or_else(|| DenormalizeError::MissingRoot(self.root.clone()))?;

        log::debug!(
            "denormalizing root {:?} ({} custom resolvers)",
            self.root,
            self.resolvers.len()
        );

        let mut mapper = LinkMapper {
            denormalizer: self,
            graph,
            resolved: 0,
        };
        let tree = try_deep_map(seed.clone(), &mut mapper)?;

        log::debug!("resolved {} links under {:?}", mapper.resolved, self.root);
        Ok(tree)
    }

    /// Resolves a single link, without expanding links inside the result.
    ///
    /// A registered resolver for the link's type takes precedence over the
    /// default `graph[type][id]` lookup. An id that cannot be a mapping key
    /// is unresolved on lookup.
    pub fn resolve_link(&self, link: &Link, graph: &Graph) -> DenormalizeResult<Node> {
        if let Some(resolver) = self.resolvers.get(&link.collection) {
            log::trace!("resolving {} with custom resolver", link);
            return resolver(&link.collection, &link.id, graph).map_err(DenormalizeError::Resolver);
        }

        log::trace!("resolving {} by lookup", link);
        graph
            .lookup_id(&link.collection, &link.id)
            .cloned()
            .map_err(|reason| DenormalizeError::UnresolvedLink {
                link: link.clone(),
                reason,
            })
    }
}

impl Default for Denormalizer {
    fn default() -> Self {
        Denormalizer::new(DEFAULT_ROOT, ResolverTable::new())
    }
}

/// Entry rewrite that swaps links for their resolved entities.
struct LinkMapper<'a> {
    denormalizer: &'a Denormalizer,
    graph: &'a Graph,
    resolved: usize,
}

impl EntryMapper for LinkMapper<'_> {
    type Error = DenormalizeError;

    fn map_entry(&mut self, key: Key, value: Node) -> Result<(Key, Node), DenormalizeError> {
        match Link::from_node(&value) {
            Ok(None) => Ok((key, value)),
            Ok(Some(link)) => {
                let entity = self.denormalizer.resolve_link(&link, self.graph)?;
                self.resolved += 1;
                Ok((key, entity))
            }
            Err(reason) => Err(DenormalizeError::InvalidLink { value, reason }),
        }
    }
}
