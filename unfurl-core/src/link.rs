use std::fmt;

use crate::map::visit_entries;
use crate::node::{Key, Mapping, Node, Scalar};

/// Field naming the target collection of a link.
pub const TYPE_FIELD: &str = "type";
/// Field holding the target id of a link.
pub const ID_FIELD: &str = "id";

/// A reference to an entity: `{type: <collection>, id: <id>, ...}`.
///
/// The id may be any non-null node. Any other fields on the link mapping
/// are discarded on resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub collection: String,
    pub id: Node,
}

/// Why a link-shaped mapping is not a valid link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("has a 'type' key but no 'id'")]
    MissingId,
    #[error("has a 'type' that is not a string")]
    TypeNotString,
}

impl Link {
    pub fn new(collection: impl Into<String>, id: impl Into<Node>) -> Self {
        Link {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Classifies a mapping as plain data, a link, or a malformed link.
    ///
    /// A null field counts as absent: `{type: null}` is plain data and
    /// `{type: "x", id: null}` is a link without an id.
    pub fn classify(map: &Mapping) -> Result<Option<Link>, Malformed> {
        let field = |name: &str| {
            map.get(&Key::Str(name.to_string()))
                .filter(|value| !value.is_null())
        };

        let Some(kind) = field(TYPE_FIELD) else {
            return Ok(None);
        };
        let Some(id) = field(ID_FIELD) else {
            return Err(Malformed::MissingId);
        };
        let Node::Scalar(Scalar::Str(collection)) = kind else {
            return Err(Malformed::TypeNotString);
        };

        Ok(Some(Link {
            collection: collection.clone(),
            id: id.clone(),
        }))
    }

    /// Classifies any node. Only mappings can be links.
    pub fn from_node(node: &Node) -> Result<Option<Link>, Malformed> {
        match node {
            Node::Mapping(map) => Link::classify(map),
            _ => Ok(None),
        }
    }

    /// Renders the link back to its mapping form.
    pub fn to_node(&self) -> Node {
        [
            (TYPE_FIELD, Node::from(self.collection.as_str())),
            (ID_FIELD, self.id.clone()),
        ]
        .into_iter()
        .collect()
    }
}

/// Renders `collection/id` with the id in node form, so `7` and `"7"` differ.
impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Collects every valid link held as a mapping value under `node`, in pre-order.
///
/// Links are not followed, and the walk does not enter a link mapping or a
/// malformed one, matching the links denormalization resolves under `node`.
pub fn collect_links(node: &Node) -> Vec<Link> {
    let mut links = Vec::new();
    visit_entries(node, &mut |_, value| match Link::from_node(value) {
        Ok(None) => true,
        Ok(Some(link)) => {
            links.push(link);
            false
        }
        Err(_) => false,
    });
    links
}
