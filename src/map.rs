//! Ordered map type for KYAML mappings.
//!
//! [`Mapping`] wraps an [`IndexMap`] so that keys iterate in insertion order.
//! The encoder writes entries in that order and the decoder inserts them in
//! the order they appear in the text, which is what makes
//! `load(dump(v)) == v` hold for mappings.
//!
//! ## Examples
//!
//! ```rust
//! use kyaml::{Mapping, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name".to_string(), Value::from("app"));
//! map.insert("replicas".to_string(), Value::from(3));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "replicas"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to KYAML values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced, the key keeps
    /// its original position, and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kyaml::{Mapping, Value};
    ///
    /// let mut map = Mapping::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, shifting later entries down so order is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for Mapping {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_./-]*`: the keys that may appear unquoted.
pub(crate) fn is_safe_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if is_bare_key_start(first) => chars.all(is_bare_key_char),
        _ => false,
    }
}

pub(crate) fn is_bare_key_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_bare_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '/' | '-')
}
