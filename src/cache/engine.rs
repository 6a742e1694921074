//! Cache Engine Module
//!
//! LRU cache combining a key index with the arena recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::cache::RecencyList;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == LRU Cache ==
/// Capacity-bounded cache with least recently used eviction.
///
/// `get`, `put` and `remove` run in O(1) average time. Every successful
/// `get` or `put` moves the entry to the most recently used position, so
/// reads take `&mut self`. Absence is reported as `None`, which keeps a
/// cached "empty" value (e.g. `Option::None` or JSON `null`) distinct from
/// a miss.
///
/// Not synchronized; see [`SharedLruCache`](crate::cache::SharedLruCache)
/// for the thread-safe wrapper.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    /// Key to arena slot id
    index: HashMap<K, usize>,
    /// Entries ordered by recency
    list: RecencyList<K, V>,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "Capacity must be a positive integer".to_string(),
            ));
        }

        let reserved = capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            index: HashMap::with_capacity(reserved),
            list: RecencyList::with_capacity(reserved),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.list.move_to_front(idx);
        self.list.value(idx)
    }

    // == Peek ==
    /// Returns the value for `key` without changing recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|&idx| self.list.value(idx))
    }

    // == Contains ==
    /// Checks if `key` is cached, without changing recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Put ==
    /// Stores `value` under `key` and marks it most recently used.
    ///
    /// An existing key keeps its slot and only has its value replaced.
    /// A new key that pushes the cache over capacity evicts exactly one
    /// entry: the least recently used one.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&idx) = self.index.get(&key) {
            self.list.replace_value(idx, value);
            self.list.move_to_front(idx);
            return;
        }

        let idx = self.list.push_front(key.clone(), value);
        self.index.insert(key, idx);

        if self.list.len() > self.capacity {
            self.evict_oldest();
        }
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was cached.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        self.list.remove(idx).map(|(_, value)| value)
    }

    // == Clear ==
    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    fn evict_oldest(&mut self) {
        if let Some((key, _)) = self.list.pop_back() {
            self.index.remove(&key);
            trace!(
                capacity = self.capacity,
                len = self.list.len(),
                "evicted least recently used entry"
            );
        }
    }
}

impl<K, V> LruCache<K, V> {
    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(key, _)| key)
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter()
    }

    /// Returns the keys ordered from least to most recently used.
    pub fn keys_lru_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.list.iter_lru().map(|(key, _)| key.clone()).collect()
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash,
{
    /// Checks that list and index agree and capacity holds.
    pub(crate) fn invariants_hold(&self) -> bool {
        self.list.links_consistent()
            && self.index.len() == self.list.len()
            && self.list.len() <= self.capacity
            && self
                .index
                .iter()
                .all(|(key, &idx)| self.list.key(idx) == Some(key))
    }
}
