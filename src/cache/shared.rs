//! Shared Cache Module
//!
//! Thread-safe handle around the LRU engine.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::LruCache;
use crate::error::Result;

// == Shared LRU Cache ==
/// Cloneable, thread-safe LRU cache.
///
/// Every operation takes one exclusive lock for its whole duration. A
/// reader/writer lock would buy nothing here because `get` relinks the
/// recency list, so each call is linearizable with respect to all others.
/// Clones share the same underlying cache.
#[derive(Debug)]
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty shared cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let cache = LruCache::new(capacity)?;
        debug!(capacity, "shared LRU cache created");
        Ok(Self::from_cache(cache))
    }

    /// Wraps an existing engine.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    // == Peek ==
    /// Returns a clone of the value for `key` without changing recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    // == Contains ==
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    // == Put ==
    /// Stores `value` under `key`, evicting the least recently used entry
    /// if the cache is full.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was cached.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    // == Clear ==
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V> SharedLruCache<K, V> {
    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the current number of entries together with the capacity,
    /// read under a single lock acquisition.
    pub fn size_and_capacity(&self) -> (usize, usize) {
        let cache = self.inner.lock();
        (cache.len(), cache.capacity())
    }

    /// Returns the keys ordered from least to most recently used.
    pub fn keys_lru_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().keys_lru_order()
    }
}
