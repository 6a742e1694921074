//! Cache Entry Module
//!
//! Defines the arena slot that holds one key/value pair and its recency links.

// == Slot Ids ==
/// Arena slot of the head sentinel (most recently used side).
pub const HEAD: usize = 0;

/// Arena slot of the tail sentinel (least recently used side).
pub const TAIL: usize = 1;

// == Cache Entry ==
/// A single node of the recency list.
///
/// Links are arena slot ids rather than references, so an entry never owns
/// its neighbours. Sentinels and freed slots carry no payload.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// Key/value pair, `None` for sentinels and free slots
    payload: Option<(K, V)>,
    /// Slot id of the neighbour closer to the head
    pub(crate) prev: usize,
    /// Slot id of the neighbour closer to the tail
    pub(crate) next: usize,
}

impl<K, V> Entry<K, V> {
    // == Constructors ==
    /// Creates an entry holding `key` and `value`, not yet linked.
    pub fn new(key: K, value: V) -> Self {
        Self {
            payload: Some((key, value)),
            prev: HEAD,
            next: TAIL,
        }
    }

    /// Creates a payload-free sentinel with the given links.
    pub(crate) fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            payload: None,
            prev,
            next,
        }
    }

    // == Accessors ==
    /// Returns the key, or `None` for a sentinel.
    pub fn key(&self) -> Option<&K> {
        self.payload.as_ref().map(|(key, _)| key)
    }

    /// Returns the value, or `None` for a sentinel.
    pub fn value(&self) -> Option<&V> {
        self.payload.as_ref().map(|(_, value)| value)
    }

    /// Replaces the stored value, returning the previous one.
    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        self.payload
            .as_mut()
            .map(|(_, slot)| std::mem::replace(slot, value))
    }

    /// Moves the payload out, leaving the slot empty.
    pub(crate) fn take(&mut self) -> Option<(K, V)> {
        self.payload.take()
    }

    /// Returns true if this slot carries no key/value pair.
    pub fn is_vacant(&self) -> bool {
        self.payload.is_none()
    }
}
