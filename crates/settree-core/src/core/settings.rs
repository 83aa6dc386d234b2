use super::error::{Result, SettingsError};
use super::key::{Key, Query, sort_keys};
use super::plain::PlainMap;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};
use tracing::trace;

/// A multi-level settings tree.
///
/// Every nested mapping is itself a `Settings` node, iteration always follows key
/// order (see [`sort_keys`]) and missing branches can be created on the fly:
///
/// ```
/// use settree::Settings;
///
/// let mut s = Settings::new();
/// s["a"]["b"]["c"] = 12.into();
/// assert_eq!(s.to_string(), "a:\t\n  b:\t\n    c:\t12\n");
/// ```
///
/// Two families of reads exist. [`get`](Self::get), [`find_nested`](Self::find_nested),
/// [`get_path`](Self::get_path) and `Index` never modify the tree.
/// [`get_or_create`](Self::get_or_create), [`branch`](Self::branch),
/// [`get_nested`](Self::get_nested) and `IndexMut` bind an empty node to any missing key
/// they walk through.
///
/// Cloning is the same as [`copy`](Self::copy).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlainMap", into = "PlainMap")]
pub struct Settings {
    entries: BTreeMap<Key, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a plain map, turning every nested map (also inside lists) into a node.
    pub fn from_plain(map: PlainMap) -> Self {
        Self {
            entries: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, query: impl Into<Query>) -> Key {
        match query.into() {
            Query::Exact(key) => key,
            Query::IgnoreCase(raw) => self.find_case(&raw),
        }
    }

    /// Returns the existing key that equals `key` ignoring case, or `key` itself.
    ///
    /// Own keys are scanned in iteration order, so among several differently cased
    /// candidates the first in order wins. Integer keys never match.
    pub fn find_case(&self, key: &str) -> Key {
        let lowered = key.to_lowercase();
        self.keys()
            .find(|k| k.as_str().is_some_and(|s| s.to_lowercase() == lowered))
            .cloned()
            .unwrap_or_else(|| Key::from(key))
    }

    pub fn get(&self, query: impl Into<Query>) -> Option<&Value> {
        let key = self.resolve(query);
        self.entries.get(&key)
    }

    pub fn get_mut(&mut self, query: impl Into<Query>) -> Option<&mut Value> {
        let key = self.resolve(query);
        self.entries.get_mut(&key)
    }

    /// Returns the value under `query`, binding a new empty node first if the key is missing.
    pub fn get_or_create(&mut self, query: impl Into<Query>) -> &mut Value {
        let key = self.resolve(query);
        match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                trace!(key = %entry.key(), "Creating empty node for missing key");
                entry.insert(Value::Node(Settings::new()))
            }
        }
    }

    /// Like [`get_or_create`](Self::get_or_create), but requires the value to be a node.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TypeMismatch`] if the key holds a non-node value.
    pub fn branch(&mut self, query: impl Into<Query>) -> Result<&mut Settings> {
        let key = self.resolve(query);
        match self.get_or_create(&key) {
            Value::Node(node) => Ok(node),
            other => Err(SettingsError::not_a_node(key, other.type_name())),
        }
    }

    /// Stores `value` under `query` and returns the previous value, if any.
    pub fn set(&mut self, query: impl Into<Query>, value: impl Into<Value>) -> Option<Value> {
        let key = self.resolve(query);
        self.entries.insert(key, value.into())
    }

    pub fn contains(&self, query: impl Into<Query>) -> bool {
        let key = self.resolve(query);
        self.entries.contains_key(&key)
    }

    /// Removes and returns the value under `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::KeyResolution`] if the key is not present.
    pub fn delete(&mut self, query: impl Into<Query>) -> Result<Value> {
        let key = self.resolve(query);
        self.entries
            .remove(&key)
            .ok_or_else(|| SettingsError::missing(&key))
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> std::vec::IntoIter<&Key> {
        let mut keys: Vec<&Key> = self.entries.keys().collect();
        sort_keys(&mut keys);
        keys.into_iter()
    }

    /// Entries in iteration order.
    pub fn iter(&self) -> std::vec::IntoIter<(&Key, &Value)> {
        self.keys()
            .filter_map(|k| self.entries.get_key_value(k))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Returns a new tree with a fresh skeleton.
    ///
    /// Nested nodes are copied recursively, leaves are not: a [`List`](super::value::List)
    /// leaf stays shared between the original and the copy, so pushing to it shows in
    /// both, while reassigning any key (at any depth) only affects one side.
    pub fn copy(&self) -> Settings {
        self.clone()
    }

    /// Fills in keys from `other` that are missing here, recursing into nodes present on
    /// both sides. Existing values are never overwritten.
    pub fn soft_update(&mut self, other: &Settings) -> &mut Self {
        for (key, incoming) in other.iter() {
            match (incoming, self.entries.get_mut(key)) {
                (Value::Node(theirs), Some(Value::Node(ours))) => {
                    ours.soft_update(theirs);
                }
                (_, Some(_)) => {}
                (_, None) => {
                    self.entries.insert(key.clone(), incoming.clone());
                }
            }
        }
        self
    }

    /// Copies every key from `other` into this tree, overwriting existing values. Nodes
    /// present on both sides are updated recursively instead of replaced.
    pub fn update(&mut self, other: &Settings) {
        for (key, incoming) in other.iter() {
            match (incoming, self.entries.get_mut(key)) {
                (Value::Node(theirs), Some(Value::Node(ours))) => ours.update(theirs),
                _ => {
                    self.entries.insert(key.clone(), incoming.clone());
                }
            }
        }
    }

    /// A copy of this tree soft-updated with `other`. Neither input is modified.
    pub fn merge(&self, other: &Settings) -> Settings {
        let mut merged = self.copy();
        merged.soft_update(other);
        merged
    }

    /// Converts the tree into plain maps, recursing through nodes and lists.
    pub fn as_plain(&self) -> PlainMap {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_plain()))
            .collect()
    }

    /// Walks `path` with auto-vivifying reads and returns the value at its end.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::KeyResolution`] for an empty path and
    /// [`SettingsError::TypeMismatch`] when the walk hits a non-node value before the end.
    pub fn get_nested<I, Q>(&mut self, path: I) -> Result<&mut Value>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        let mut queries = path.into_iter().map(Into::into);
        let first = queries.next().ok_or_else(empty_path)?;
        let mut walked = first.raw();
        let mut current = self.get_or_create(first);
        for query in queries {
            let raw = query.raw();
            current = match current {
                Value::Node(node) => node.get_or_create(query),
                other => return Err(SettingsError::not_a_node(walked, other.type_name())),
            };
            walked = raw;
        }
        Ok(current)
    }

    /// The non-mutating counterpart of [`get_nested`](Self::get_nested).
    pub fn find_nested<I, Q>(&self, path: I) -> Option<&Value>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        self.lookup_nested(path).ok()
    }

    fn lookup_nested<I, Q>(&self, path: I) -> Result<&Value>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        let mut queries = path.into_iter().map(Into::into);
        let first = queries.next().ok_or_else(empty_path)?;
        let mut walked = first.raw();
        let mut current = self.get(first).ok_or_else(|| SettingsError::missing(&walked))?;
        for query in queries {
            let raw = query.raw();
            let node = match current {
                Value::Node(node) => node,
                other => return Err(SettingsError::not_a_node(walked, other.type_name())),
            };
            current = node.get(query).ok_or_else(|| SettingsError::missing(&raw))?;
            walked = raw;
        }
        Ok(current)
    }

    /// Walks all but the last key of `path` (creating missing nodes) and stores `value`
    /// under the last one. Returns the previous value, if any.
    ///
    /// # Errors
    ///
    /// Same as [`get_nested`](Self::get_nested).
    pub fn set_nested<I, Q>(&mut self, path: I, value: impl Into<Value>) -> Result<Option<Value>>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        let mut queries: Vec<Query> = path.into_iter().map(Into::into).collect();
        let last = queries.pop().ok_or_else(empty_path)?;
        let mut node = self;
        for query in queries {
            node = node.branch(query)?;
        }
        Ok(node.set(last, value))
    }

    /// Non-mutating lookup of a dotted path such as `"input.global.run_type"`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::KeyResolution`] for malformed paths and missing keys,
    /// [`SettingsError::TypeMismatch`] when the path runs through a non-node value.
    pub fn get_path(&self, path: &str) -> Result<&Value> {
        self.lookup_nested(path_keys(path)?)
    }

    /// Auto-vivifying lookup of a dotted path.
    pub fn get_path_mut(&mut self, path: &str) -> Result<&mut Value> {
        self.get_nested(path_keys(path)?)
    }

    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.set_nested(path_keys(path)?, value)
    }

    /// Removes the value at a dotted path without creating anything on the way.
    pub fn delete_path(&mut self, path: &str) -> Result<Value> {
        let mut keys = path_keys(path)?;
        let last = keys.pop().ok_or_else(empty_path)?;
        let mut node = self;
        for key in keys {
            node = match node.entries.get_mut(&key) {
                Some(Value::Node(child)) => child,
                Some(other) => return Err(SettingsError::not_a_node(key, other.type_name())),
                None => return Err(SettingsError::missing(key)),
            };
        }
        node.delete(last)
    }

    /// Renders the tree, one `key:<TAB>value` line per leaf.
    ///
    /// Nested nodes start on a new line, indented by `indent` plus the length of the
    /// parent key plus one. The output only depends on the tree contents.
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        let pad = " ".repeat(indent);
        for (key, value) in self.iter() {
            let name = key.to_string();
            out.push_str(&pad);
            out.push_str(&name);
            out.push_str(":\t");
            match value {
                Value::Node(node) => {
                    out.push('\n');
                    out.push_str(&node.render(indent + name.chars().count() + 1));
                }
                other => {
                    out.push_str(&other.to_string());
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn empty_path() -> SettingsError {
    SettingsError::KeyResolution {
        key: String::new(),
        reason: "empty path",
    }
}

/// Splits a dotted path into keys.
///
/// Segments are always string keys. Empty segments and segments that both start and
/// end with `__` are rejected.
pub fn path_keys(path: &str) -> Result<Vec<Key>> {
    path.split('.')
        .map(|segment| {
            if segment.is_empty() {
                Err(SettingsError::KeyResolution {
                    key: path.to_string(),
                    reason: "empty path segment",
                })
            } else if segment.starts_with("__") && segment.ends_with("__") {
                Err(SettingsError::KeyResolution {
                    key: segment.to_string(),
                    reason: "reserved name",
                })
            } else {
                Ok(Key::from(segment))
            }
        })
        .collect()
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

/// Covers [`PlainMap`] as well as maps of scalars, lists or nodes.
impl<K: Into<Key>, V: Into<Value>> From<BTreeMap<K, V>> for Settings {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Settings> for PlainMap {
    fn from(settings: Settings) -> Self {
        settings.as_plain()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = (&'a Key, &'a Value);
    type IntoIter = std::vec::IntoIter<(&'a Key, &'a Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Panics if the key is missing, like the standard maps do.
impl<Q: Into<Query>> Index<Q> for Settings {
    type Output = Value;

    fn index(&self, query: Q) -> &Value {
        let key = self.resolve(query);
        match self.entries.get(&key) {
            Some(value) => value,
            None => panic!("key '{}' not present in settings", key),
        }
    }
}

/// Auto-vivifies, see [`Settings::get_or_create`].
impl<Q: Into<Query>> IndexMut<Q> for Settings {
    fn index_mut(&mut self, query: Q) -> &mut Value {
        self.get_or_create(query)
    }
}

/// `a += &b` is [`Settings::soft_update`].
impl AddAssign<&Settings> for Settings {
    fn add_assign(&mut self, other: &Settings) {
        self.soft_update(other);
    }
}

/// `&a + &b` is [`Settings::merge`].
impl Add<&Settings> for &Settings {
    type Output = Settings;

    fn add(self, other: &Settings) -> Settings {
        self.merge(other)
    }
}
