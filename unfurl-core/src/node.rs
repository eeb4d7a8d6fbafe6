use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered mapping node. Inserting an existing key overwrites the value in place.
pub type Mapping = IndexMap<Key, Node>;

/// A hashable scalar, usable as a mapping key. The default lookup converts link ids to keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Key {
    /// Returns the key as a string slice, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{}", n),
            Key::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<Key> for Node {
    fn from(key: Key) -> Self {
        match key {
            Key::Str(s) => Node::Scalar(Scalar::Str(s)),
            Key::Int(n) => Node::Scalar(Scalar::Int(n)),
            Key::Bool(b) => Node::Scalar(Scalar::Bool(b)),
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A node of a nested data tree: mapping, sequence or scalar.
///
/// Normalized graphs, resolved entities and denormalized trees are all
/// expressed as nodes. There is no fixed schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

impl Node {
    /// The null scalar.
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    /// An empty mapping.
    pub fn mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Looks up a string key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()
            .and_then(|map| map.get(&Key::Str(key.to_string())))
    }

    /// Converts a hashable scalar into a key.
    ///
    /// Null, floats and containers have no key form.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Node::Scalar(Scalar::Str(s)) => Some(Key::Str(s.clone())),
            Node::Scalar(Scalar::Int(n)) => Some(Key::Int(*n)),
            Node::Scalar(Scalar::Bool(b)) => Some(Key::Bool(*b)),
            _ => None,
        }
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "bool",
            Node::Scalar(Scalar::Int(_)) => "int",
            Node::Scalar(Scalar::Float(_)) => "float",
            Node::Scalar(Scalar::Str(_)) => "string",
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Int(n))
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Scalar(Scalar::Int(i64::from(n)))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl<K: Into<Key>, V: Into<Node>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Node::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Compact JSON-like rendering, used in error messages.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match k {
                        Key::Str(s) => write!(f, "{:?}: {}", s, v)?,
                        other => write!(f, "{}: {}", other, v)?,
                    }
                }
                f.write_str("}")
            }
            Node::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Node::Scalar(Scalar::Null) => f.write_str("null"),
            Node::Scalar(Scalar::Bool(b)) => write!(f, "{}", b),
            Node::Scalar(Scalar::Int(n)) => write!(f, "{}", n),
            Node::Scalar(Scalar::Float(x)) => write!(f, "{}", x),
            Node::Scalar(Scalar::Str(s)) => write!(f, "{:?}", s),
        }
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Key::Str(s) => serializer.serialize_str(s),
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, integer or boolean key")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(Key::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Key::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(Key::Int)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Key::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(Key::Str(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Mapping(map) => serializer.collect_map(map),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Node::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Node::Scalar(Scalar::Int(n)) => serializer.serialize_i64(*n),
            Node::Scalar(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Node::Scalar(Scalar::Str(s)) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping, sequence or scalar")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Node::null())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Node::null())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Node::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Scalar::Bool(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Scalar::Int(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(|n| Node::Scalar(Scalar::Int(n)))
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &"a signed 64-bit integer"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Scalar::Float(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Scalar::Str(v.to_string())))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(Node::Scalar(Scalar::Str(v)))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Node::Sequence(items))
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = Mapping::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<Key, Node>()? {
                    map.insert(key, value);
                }
                Ok(Node::Mapping(map))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn deserialize_nested() {
        let n = node(serde_json::json!({"a": [1, "two", null, 2.5, true], "b": {"c": {}}}));
        let a = n.get("a").and_then(Node::as_sequence).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(a[0], Node::from(1));
        assert_eq!(a[1].as_str(), Some("two"));
        assert!(a[2].is_null());
        assert_eq!(a[3], Node::from(2.5));
        assert_eq!(a[4], Node::from(true));
        assert_eq!(n.get("b").and_then(|b| b.get("c")), Some(&Node::mapping()));
    }

    #[test]
    fn mapping_preserves_source_order() {
        let n: Node = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<String> = n.as_mapping().unwrap().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&n).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn scalar_to_key() {
        assert_eq!(Node::from("x").to_key(), Some(Key::from("x")));
        assert_eq!(Node::from(7).to_key(), Some(Key::Int(7)));
        assert_eq!(Node::from(false).to_key(), Some(Key::Bool(false)));
        assert_eq!(Node::from(1.5).to_key(), None);
        assert_eq!(Node::null().to_key(), None);
        assert_eq!(Node::mapping().to_key(), None);
    }

    #[test]
    fn display_is_compact() {
        let n: Node = [("type", Node::from("assets")), ("n", Node::from(1))]
            .into_iter()
            .collect();
        assert_eq!(n.to_string(), r#"{"type": "assets", "n": 1}"#);
        let seq = Node::from(vec![Node::null(), Node::from(true)]);
        assert_eq!(seq.to_string(), "[null, true]");
    }

    #[test]
    fn last_write_wins() {
        let mut map = Mapping::new();
        map.insert(Key::from("a"), Node::from(1));
        map.insert(Key::from("b"), Node::from(2));
        map.insert(Key::from("a"), Node::from(3));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Key::from("a")), Some(&Node::from(3)));
    }

    #[test]
    fn oversized_unsigned_rejected() {
        let res: Result<Node, _> = serde_json::from_str("18446744073709551615");
        assert!(res.is_err());
    }
}
