//! Map type for KSON objects.
//!
//! [`KsonMap`] wraps an [`IndexMap`]: lookups are by key, iteration follows
//! insertion order, and equality ignores order. Two objects are equal when
//! they hold the same keys with pairwise-equal values.
//!
//! ## Examples
//!
//! ```rust
//! use kson::{KsonMap, Value};
//!
//! let mut map = KsonMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A map of identifier keys to KSON values.
///
/// # Examples
///
/// ```rust
/// use kson::{KsonMap, Value};
///
/// let mut map = KsonMap::new();
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
///
/// map.sort_keys();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KsonMap(IndexMap<String, Value>);

impl KsonMap {
    /// Creates an empty `KsonMap`.
    #[must_use]
    pub fn new() -> Self {
        KsonMap(IndexMap::new())
    }

    /// Creates an empty `KsonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KsonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the key keeps its position,
    /// the value is replaced and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::{KsonMap, Value};
    ///
    /// let mut map = KsonMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// assert_eq!(map.get("key").and_then(|v| v.as_i64()), Some(43));
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns the object stored under `key`, if that entry is an object.
    #[must_use]
    pub fn get_object(&self, key: &str) -> Option<&KsonMap> {
        self.get(key).and_then(Value::as_object)
    }

    /// Returns the array stored under `key`, if that entry is an array.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reorders the entries by key.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }
}

impl Serialize for KsonMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KsonMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KsonMapVisitor;

        impl<'de> Visitor<'de> for KsonMapVisitor {
            type Value = KsonMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a KSON object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = KsonMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(KsonMapVisitor)
    }
}

impl From<HashMap<String, Value>> for KsonMap {
    fn from(map: HashMap<String, Value>) -> Self {
        KsonMap(map.into_iter().collect())
    }
}

impl From<KsonMap> for HashMap<String, Value> {
    fn from(map: KsonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for KsonMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KsonMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for KsonMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        KsonMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookups() {
        let mut inner = KsonMap::new();
        inner.insert("x".to_string(), Value::from(1));

        let mut map = KsonMap::new();
        map.insert("obj".to_string(), Value::Object(inner.clone()));
        map.insert("arr".to_string(), Value::Array(vec![Value::Null]));

        assert_eq!(map.get_object("obj"), Some(&inner));
        assert_eq!(map.get_object("arr"), None);
        assert_eq!(map.get_array("arr").map(Vec::len), Some(1));
        assert_eq!(map.get_array("obj"), None);
        assert_eq!(map.get_array("missing"), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: KsonMap = vec![
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
            ("c".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove("b"), Some(Value::from(2)));
        assert!(!map.contains_key("b"));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_hashmap_conversions() {
        let mut hash = HashMap::new();
        hash.insert("k".to_string(), Value::Bool(false));
        let map = KsonMap::from(hash.clone());
        assert_eq!(HashMap::from(map), hash);
    }
}
