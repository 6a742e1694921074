//! Cache Module
//!
//! Provides a capacity-bounded LRU cache built on an arena-backed recency list.

mod engine;
mod entry;
mod list;
mod sentinel;
mod shared;


// Re-export public types
pub use engine::LruCache;
pub(crate) use list::RecencyList;
pub use sentinel::{IntLruCache, SentinelCache, INT_MISS};
pub use shared::SharedLruCache;

// == Public Constants ==
/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
