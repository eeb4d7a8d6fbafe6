use crate::link::{Link, Malformed};
use crate::node::Node;

/// Error raised by a caller-supplied resolver. Propagated unchanged.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Why the default lookup could not find a link's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unresolved {
    #[error("no such collection")]
    MissingCollection,
    #[error("collection is not a mapping of ids to entities")]
    NotATable,
    #[error("no entity with that id")]
    MissingId,
}

/// Error type for denormalization.
#[derive(Debug, thiserror::Error)]
pub enum DenormalizeError {
    #[error("invalid link: {value} {reason}")]
    InvalidLink { value: Node, reason: Malformed },
    #[error("unresolved link {link}: {reason}")]
    UnresolvedLink { link: Link, reason: Unresolved },
    #[error("root collection not found: {0:?}")]
    MissingRoot(String),
    #[error(transparent)]
    Resolver(ResolverError),
}

impl DenormalizeError {
    /// Returns the resolver's own error, if this failure came from one.
    pub fn resolver_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DenormalizeError::Resolver(e) => Some(&**e),
            _ => None,
        }
    }
}

pub type DenormalizeResult<T> = Result<T, DenormalizeError>;

/// Error building a graph from a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("normalized graph must be a mapping, got {0}")]
    NotAMapping(&'static str),
    #[error("collection names must be strings, got {0}")]
    NonStringCollection(String),
}

/// Invalid denormalizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("root collection name must not be empty")]
    EmptyRoot,
    #[error("path prefix for type {0:?} must not be empty")]
    EmptyPrefix(String),
    #[error("path prefix entry has an empty type name")]
    EmptyPrefixType,
}
