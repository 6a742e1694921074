//! Sentinel Cache Module
//!
//! Presents the shared LRU cache with a reserved "miss" value instead of `Option`.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::cache::SharedLruCache;
use crate::error::Result;

/// Value returned by [`IntLruCache`] on a miss.
pub const INT_MISS: i32 = -1;

// == Sentinel Cache ==
/// LRU cache that reports misses as a fixed sentinel value.
///
/// Behaves exactly like [`SharedLruCache`]; only the return type of `get`
/// and `remove` differs. A cached value equal to the sentinel cannot be
/// told apart from a miss, so prefer the `Option`-returning API whenever
/// every value of `V` is legitimate.
#[derive(Debug, Clone)]
pub struct SentinelCache<K, V> {
    inner: SharedLruCache<K, V>,
    miss: V,
}

impl<K, V> SentinelCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries that answers
    /// `miss` for absent keys.
    pub fn new(capacity: usize, miss: V) -> Result<Self> {
        Ok(Self {
            inner: SharedLruCache::new(capacity)?,
            miss,
        })
    }

    // == Get ==
    /// Returns the value for `key`, or the miss sentinel.
    pub fn get<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key).unwrap_or_else(|| self.miss.clone())
    }

    // == Put ==
    pub fn put(&self, key: K, value: V) {
        self.inner.put(key, value);
    }

    // == Remove ==
    /// Removes `key`, returning its value or the miss sentinel.
    pub fn remove<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key).unwrap_or_else(|| self.miss.clone())
    }

    // == Size ==
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    /// Returns the value reported for absent keys.
    pub fn miss_value(&self) -> &V {
        &self.miss
    }

    /// Returns the underlying `Option`-returning cache.
    pub fn as_shared(&self) -> &SharedLruCache<K, V> {
        &self.inner
    }
}

// == Int LRU Cache ==
/// Integer-keyed LRU cache answering `-1` on a miss.
pub type IntLruCache = SentinelCache<i32, i32>;

impl IntLruCache {
    /// Creates an integer cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, INT_MISS)
    }
}
