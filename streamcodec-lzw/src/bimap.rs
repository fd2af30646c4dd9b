//! A one-to-one map searchable from either side.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Bijective map between keys and values.
///
/// Inserting a pair whose key or value is already present replaces the old
/// pairing on both sides.
#[derive(Debug, Clone)]
pub struct Bimap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> Bimap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Insert the pair `key <-> value`.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(old_value) = self.forward.remove(&key) {
            self.reverse.remove(&old_value);
        }
        if let Some(old_key) = self.reverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        self.forward.insert(key.clone(), value.clone());
        self.reverse.insert(value, key);
    }

    /// Value paired with `key`.
    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// Key paired with `value`.
    pub fn get_by_value<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.reverse.get(value)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    /// Remove every pair.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<K, V> Default for Bimap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let mut map = Bimap::new();
        map.insert(1u32, String::from("one"));
        map.insert(2, String::from("two"));

        assert_eq!(map.get_by_key(&1).map(String::as_str), Some("one"));
        assert_eq!(map.get_by_value("two"), Some(&2));
        assert!(map.contains_key(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_replace_keeps_bijection() {
        let mut map = Bimap::new();
        map.insert(1u32, 'a');
        map.insert(2, 'a');

        assert_eq!(map.len(), 1);
        assert_eq!(map.get_by_key(&1), None);
        assert_eq!(map.get_by_value(&'a'), Some(&2));

        map.clear();
        assert!(map.is_empty());
    }
}
