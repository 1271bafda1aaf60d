//! In-memory catalog trees and key-path navigation

use crate::error::{CatalogError, CatalogResult};
use crate::path::{KeyPath, Segment};
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;

/// One parsed catalog document, or a node inside one.
///
/// Trees are never mutated after construction; a reload builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogTree {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept as written (integer or float)
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<CatalogTree>),
    /// JSON object
    Object(HashMap<String, CatalogTree>),
}

impl Default for CatalogTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl CatalogTree {
    /// The empty object, used whenever a catalog is missing or unreadable.
    #[must_use]
    pub fn empty() -> Self {
        Self::Object(HashMap::new())
    }

    /// Parse catalog bytes. The top-level value must be an object.
    pub fn parse(bytes: &[u8]) -> CatalogResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            Value::Object(_) => Ok(Self::from(value)),
            other => Err(CatalogError::NotAnObject {
                found: kind_of(&other),
            }),
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Whether this node is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The elements, if this node is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[CatalogTree]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The properties, if this node is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&HashMap<String, CatalogTree>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Property `key` of this node, if it is an object holding one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogTree> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Resolve a raw key against this node.
    ///
    /// The whole key is first tried as a single literal property, so
    /// catalogs may use flat dotted keys such as `"menu.open"`. Only when
    /// that misses is the key parsed and walked segment by segment.
    #[must_use]
    pub fn navigate(&self, key: &str) -> Option<&CatalogTree> {
        self.lookup(key, &KeyPath::parse(key))
    }

    /// [`navigate`](Self::navigate) with a path parsed ahead of time.
    ///
    /// `path` must be the parse of `key`; it lets callers consult several
    /// trees without re-parsing.
    #[must_use]
    pub fn lookup(&self, key: &str, path: &KeyPath) -> Option<&CatalogTree> {
        if key.is_empty() {
            return None;
        }
        if let Some(direct) = self.get(key) {
            return Some(direct);
        }
        self.navigate_path(path)
    }

    /// Walk `path` from this node. A null, a missing property, a non-array
    /// under an index, or an out-of-range index ends the walk with `None`.
    #[must_use]
    pub fn navigate_path(&self, path: &KeyPath) -> Option<&CatalogTree> {
        path.iter().try_fold(self, |node, segment| node.step(segment))
    }

    fn step(&self, segment: &Segment) -> Option<&CatalogTree> {
        match segment {
            Segment::Property(name) => self.get(name),
            Segment::Element { name, index } => {
                let container = if name.is_empty() { self } else { self.get(name)? };
                container.as_array()?.get(*index)
            }
        }
    }

    /// Display text of this node as returned by string lookups.
    ///
    /// Strings are returned verbatim, booleans as `true`/`false`, `null` as
    /// the empty string, containers as pretty-printed JSON. Numbers use JSON
    /// notation except that integral floats drop their fraction (`1.0` and
    /// `1e2` display as `1` and `100`).
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => display_number(n),
            Self::String(s) => s.clone(),
            Self::Array(_) | Self::Object(_) => format!("{:#}", Value::from(self)),
        }
    }

    /// Key paths of every scalar or null leaf, in sorted order.
    ///
    /// Object members are joined with `.` and array elements with `[i]`,
    /// matching the syntax accepted by [`navigate`](Self::navigate).
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaves(String::new(), &mut paths);
        paths.sort();
        paths
    }

    fn collect_leaves(&self, prefix: String, out: &mut Vec<String>) {
        match self {
            Self::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.collect_leaves(path, out);
                }
            }
            Self::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    child.collect_leaves(format!("{prefix}[{i}]"), out);
                }
            }
            _ if !prefix.is_empty() => out.push(prefix),
            _ => {}
        }
    }
}

// Above 2^53 an f64 no longer holds every integer, so keep serde's notation.
#[allow(clippy::float_cmp)]
fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() && x.trunc() == x && x.abs() < 9_007_199_254_740_992.0 => {
            format!("{x:.0}")
        }
        _ => n.to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Value> for CatalogTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&CatalogTree> for Value {
    fn from(tree: &CatalogTree) -> Self {
        match tree {
            CatalogTree::Null => Self::Null,
            CatalogTree::Bool(b) => Self::Bool(*b),
            CatalogTree::Number(n) => Self::Number(n.clone()),
            CatalogTree::String(s) => Self::String(s.clone()),
            CatalogTree::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            CatalogTree::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for CatalogTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
