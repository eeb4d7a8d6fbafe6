//! Generic pre-order deep map over node trees.
//!
//! Every entry of every mapping is handed to a caller-supplied rewrite,
//! and the traversal then descends into the *rewritten* value. A rewrite that
//! swaps a value for a different subtree therefore gets that subtree scanned
//! as well. Sequences are mapped element-wise; scalars are returned unchanged.

use std::convert::Infallible;

use crate::node::{Key, Mapping, Node};

/// A rewrite applied to mapping entries during a deep map.
pub trait EntryMapper {
    type Error;

    /// Rewrites a single mapping entry, before its contents are visited.
    fn map_entry(&mut self, key: Key, value: Node) -> Result<(Key, Node), Self::Error>;
}

impl<F, E> EntryMapper for F
where
    F: FnMut(Key, Node) -> Result<(Key, Node), E>,
{
    type Error = E;

    fn map_entry(&mut self, key: Key, value: Node) -> Result<(Key, Node), E> {
        self(key, value)
    }
}

/// Fallible deep map. The first error aborts the whole traversal.
pub fn try_deep_map<M>(node: Node, mapper: &mut M) -> Result<Node, M::Error>
where
    M: EntryMapper + ?Sized,
{
    match node {
        Node::Mapping(map) => {
            let mut out = Mapping::with_capacity(map.len());
            for (key, value) in map {
                let (key, value) = mapper.map_entry(key, value)?;
                out.insert(key, try_deep_map(value, mapper)?);
            }
            Ok(Node::Mapping(out))
        }
        Node::Sequence(items) => items
            .into_iter()
            .map(|item| try_deep_map(item, mapper))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Sequence),
        scalar @ Node::Scalar(_) => Ok(scalar),
    }
}

/// Infallible deep map.
///
/// ```
/// use unfurl_core::{deep_map, Key, Node};
///
/// // stringify keys
/// let tree: Node = [(Key::Int(1), Node::from("a"))].into_iter().collect();
/// let out = deep_map(tree, |k, v| (Key::Str(k.to_string()), v));
/// assert_eq!(out.get("1"), Some(&Node::from("a")));
/// ```
pub fn deep_map<F>(node: Node, f: F) -> Node
where
    F: FnMut(Key, Node) -> (Key, Node),
{
    struct Total<F>(F);

    impl<F> EntryMapper for Total<F>
    where
        F: FnMut(Key, Node) -> (Key, Node),
    {
        type Error = Infallible;

        fn map_entry(&mut self, key: Key, value: Node) -> Result<(Key, Node), Infallible> {
            Ok((self.0)(key, value))
        }
    }

    match try_deep_map(node, &mut Total(f)) {
        Ok(node) => node,
        Err(never) => match never {},
    }
}

/// Read-only pre-order walk over mapping entries under `node`.
///
/// The visitor returns whether to descend into the entry's value.
pub fn visit_entries<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&Key, &Node) -> bool,
{
    match node {
        Node::Mapping(map) => {
            for (key, value) in map {
                if visitor(key, value) {
                    visit_entries(value, visitor);
                }
            }
        }
        Node::Sequence(items) => {
            for item in items {
                visit_entries(item, visitor);
            }
        }
        Node::Scalar(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Scalar;

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn doubles_all_integers() {
        let tree = node(serde_json::json!({"a": {"b": {"c": 1}, "d": [{"e": 1, "f": 2}]}}));
        let out = deep_map(tree, |k, v| match v {
            Node::Scalar(Scalar::Int(n)) => (k, Node::from(n * 2)),
            other => (k, other),
        });
        assert_eq!(
            out,
            node(serde_json::json!({"a": {"b": {"c": 2}, "d": [{"e": 2, "f": 4}]}}))
        );
    }

    #[test]
    fn scalars_and_sequences_of_scalars_untouched() {
        let mut calls = 0;
        let out = deep_map(node(serde_json::json!([1, "x", null])), |k, v| {
            calls += 1;
            (k, v)
        });
        assert_eq!(out, node(serde_json::json!([1, "x", null])));
        assert_eq!(calls, 0);

        let scalar = deep_map(Node::from("plain"), |k, v| (k, v));
        assert_eq!(scalar, Node::from("plain"));
    }

    #[test]
    fn descends_into_rewritten_value() {
        let tree = node(serde_json::json!({"slot": "placeholder"}));
        let out = deep_map(tree, |k, v| {
            if v.as_str() == Some("placeholder") {
                (k, node(serde_json::json!({"inner": "placeholder-free", "n": 1})))
            } else if k == Key::from("n") {
                (k, Node::from(100))
            } else {
                (k, v)
            }
        });
        assert_eq!(
            out,
            node(serde_json::json!({"slot": {"inner": "placeholder-free", "n": 100}}))
        );
    }

    #[test]
    fn pre_order_sees_parent_before_children() {
        let tree = node(serde_json::json!({"a": {"b": {"c": 1}}}));
        let mut seen = Vec::new();
        deep_map(tree, |k, v| {
            seen.push(k.to_string());
            (k, v)
        });
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn key_collision_last_write_wins() {
        let tree = node(serde_json::json!({"a": 1, "b": 2}));
        let out = deep_map(tree, |_, v| (Key::from("same"), v));
        let map = out.as_mapping().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Key::from("same")), Some(&Node::from(2)));
    }

    #[test]
    fn first_error_aborts() {
        let tree = node(serde_json::json!({"ok": 1, "bad": 2, "later": 3}));
        let mut visited = Vec::new();
        let res = try_deep_map(tree, &mut |k: Key, v: Node| {
            visited.push(k.to_string());
            if k == Key::from("bad") {
                Err("bad entry")
            } else {
                Ok((k, v))
            }
        });
        assert_eq!(res, Err("bad entry"));
        assert_eq!(visited, vec!["ok", "bad"]);
    }

    #[test]
    fn visit_entries_pre_order() {
        let tree = node(serde_json::json!([{"a": {"b": 1}}, {"c": [ {"d": 2} ]}]));
        let mut keys = Vec::new();
        visit_entries(&tree, &mut |k, _| {
            keys.push(k.to_string());
            true
        });
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn visit_entries_skips_pruned_values() {
        let tree = node(serde_json::json!({"a": {"b": 1}, "c": {"d": 2}}));
        let mut keys = Vec::new();
        visit_entries(&tree, &mut |k, _| {
            keys.push(k.to_string());
            *k != Key::from("a")
        });
        assert_eq!(keys, vec!["a", "c", "d"]);
    }
}
