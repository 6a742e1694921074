//! Concurrency Stress Tests
//!
//! Hammers one shared cache from many threads with overlapping keys.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use lru_store::{IntLruCache, SharedLruCache};

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 5_000;
const KEY_SPACE: usize = 64;
const CAPACITY: usize = 16;

/// Values encode their writer and key so every survivor can be traced
/// back to a write that actually happened.
fn encode(thread_id: usize, key: usize, seq: usize) -> String {
    format!("{}:{}:{}", thread_id, key, seq)
}

#[test]
fn test_concurrent_put_get_stays_consistent() {
    let cache: SharedLruCache<usize, String> = SharedLruCache::new(CAPACITY).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let cache = cache.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut written = HashSet::new();
                barrier.wait();

                for seq in 0..OPS_PER_THREAD {
                    let key = (seq * 7 + thread_id * 13) % KEY_SPACE;
                    if seq % 3 == 0 {
                        if let Some(value) = cache.get(&key) {
                            // Whatever we read must belong to this key
                            assert!(value.split(':').nth(1) == Some(key.to_string().as_str()));
                        }
                    } else {
                        let value = encode(thread_id, key, seq);
                        cache.put(key, value.clone());
                        written.insert(value);
                    }
                    if seq % 101 == 0 {
                        cache.remove(&((key + 1) % KEY_SPACE));
                    }
                    assert!(cache.len() <= CAPACITY);
                }
                written
            })
        })
        .collect();

    let mut all_written = HashSet::new();
    for handle in handles {
        all_written.extend(handle.join().expect("worker thread panicked"));
    }

    assert!(cache.len() <= CAPACITY);
    assert_eq!(cache.keys_lru_order().len(), cache.len());

    for key in cache.keys_lru_order() {
        let value = cache.peek(&key).expect("listed key must be present");
        assert!(all_written.contains(&value), "value {} never written", value);
        assert_eq!(value.split(':').nth(1), Some(key.to_string().as_str()));
    }
}

#[test]
fn test_shared_cache_with_huge_capacity_constructs() {
    let cache: SharedLruCache<u64, u64> = SharedLruCache::new(1usize << 40).unwrap();

    for key in 0..10 {
        cache.put(key, key);
    }

    assert_eq!(cache.size_and_capacity(), (10, 1usize << 40));
    assert_eq!(cache.get(&9), Some(9));
}

#[test]
fn test_concurrent_int_cache_never_exceeds_capacity() {
    let cache = IntLruCache::with_capacity(CAPACITY).unwrap();

    thread::scope(|scope| {
        for thread_id in 0..THREADS as i32 {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..OPS_PER_THREAD as i32 {
                    let key = (i + thread_id) % KEY_SPACE as i32;
                    cache.put(key, key * 10);
                    let value = cache.get(&((key + 3) % KEY_SPACE as i32));
                    assert!(value == -1 || value % 10 == 0);
                }
            });
        }
    });

    assert!(cache.size() <= CAPACITY);
    for key in cache.as_shared().keys_lru_order() {
        assert_eq!(cache.get(&key), key * 10);
    }
}
