//! Recency List Module
//!
//! Arena-backed doubly linked list ordering entries by recency of use.

use crate::cache::entry::{Entry, HEAD, TAIL};

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Entries live in a `Vec` arena and link to each other by slot id.
/// Two sentinels occupy fixed slots and are never freed:
/// - `HEAD` side = Most recently used
/// - `TAIL` side = Least recently used
///
/// Freed slots are recycled through a free list, so every operation that
/// touches a single entry is O(1).
#[derive(Debug, Clone)]
pub(crate) struct RecencyList<K, V> {
    /// Arena of entries; slots 0 and 1 are the sentinels
    slots: Vec<Entry<K, V>>,
    /// Vacant slot ids available for reuse
    free: Vec<usize>,
    /// Number of real entries currently linked
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list containing only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with arena room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(2));
        slots.push(Entry::sentinel(HEAD, TAIL));
        slots.push(Entry::sentinel(HEAD, TAIL));

        Self {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry as the most recently used and returns its slot id.
    pub fn push_front(&mut self, key: K, value: V) -> usize {
        let entry = Entry::new(key, value);
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = entry;
                idx
            }
            None => {
                self.slots.push(entry);
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry in `idx` as most recently used.
    ///
    /// Does nothing if `idx` does not hold a linked entry.
    pub fn move_to_front(&mut self, idx: usize) {
        if !self.is_linked(idx) || self.slots[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Unlinks the entry in `idx` and frees its slot.
    ///
    /// Returns the key/value pair, or `None` if the slot held no entry.
    pub fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        if !self.is_linked(idx) {
            return None;
        }

        self.unlink(idx);
        let pair = self.slots[idx].take();
        self.free.push(idx);
        self.len -= 1;
        pair
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.slots[TAIL].prev;
        if idx == HEAD {
            return None;
        }
        self.remove(idx)
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub fn peek_back(&self) -> Option<&K> {
        self.slots[self.slots[TAIL].prev].key()
    }

    // == Slot Access ==
    /// Returns the key stored in `idx`.
    #[cfg(test)]
    pub fn key(&self, idx: usize) -> Option<&K> {
        self.slots.get(idx).and_then(Entry::key)
    }

    /// Returns the value stored in `idx` without touching recency.
    pub fn value(&self, idx: usize) -> Option<&V> {
        self.slots.get(idx).and_then(Entry::value)
    }

    /// Overwrites the value stored in `idx`, returning the previous one.
    pub fn replace_value(&mut self, idx: usize, value: V) -> Option<V> {
        if !self.is_linked(idx) {
            return None;
        }
        self.slots[idx].replace_value(value)
    }

    // == Length ==
    /// Returns the number of real entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every real entry; the sentinels stay in place.
    pub fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD] = Entry::sentinel(HEAD, TAIL);
        self.slots[TAIL] = Entry::sentinel(HEAD, TAIL);
        self.free.clear();
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.slots[HEAD].next,
            stop: TAIL,
            forward: true,
        }
    }

    /// Iterates entries from least to most recently used.
    pub fn iter_lru(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.slots[TAIL].prev,
            stop: HEAD,
            forward: false,
        }
    }

    // == Link Helpers ==
    fn is_linked(&self, idx: usize) -> bool {
        idx > TAIL && self.slots.get(idx).is_some_and(|entry| !entry.is_vacant())
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = TAIL;
    }

    fn link_front(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    /// Walks the list both ways and checks that the two walks mirror each
    /// other, cover exactly `len` entries and never hit a self link.
    #[cfg(test)]
    pub(crate) fn links_consistent(&self) -> bool {
        let mut forward = Vec::new();
        let mut idx = self.slots[HEAD].next;
        while idx != TAIL {
            let entry = &self.slots[idx];
            if entry.is_vacant() || entry.prev == idx || entry.next == idx {
                return false;
            }
            forward.push(idx);
            if forward.len() > self.len {
                return false;
            }
            idx = entry.next;
        }

        let mut backward = Vec::new();
        let mut idx = self.slots[TAIL].prev;
        while idx != HEAD {
            backward.push(idx);
            if backward.len() > self.len {
                return false;
            }
            idx = self.slots[idx].prev;
        }

        backward.reverse();
        forward.len() == self.len && forward == backward
    }
}

// == Iterator ==
/// Iterator over `(key, value)` pairs in recency order.
#[derive(Debug)]
pub(crate) struct Iter<'a, K, V> {
    slots: &'a [Entry<K, V>],
    cursor: usize,
    stop: usize,
    forward: bool,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.stop {
            return None;
        }

        let entry = &self.slots[self.cursor];
        self.cursor = if self.forward { entry.next } else { entry.prev };
        entry.key().zip(entry.value())
    }
}
