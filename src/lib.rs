//! LRU Store - A capacity-bounded least recently used cache
//!
//! Provides an arena-backed LRU engine, a thread-safe handle around it,
//! a sentinel-returning variant and an HTTP surface for the shared cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{IntLruCache, LruCache, SentinelCache, SharedLruCache};
pub use config::Config;
pub use error::{CacheError, Result};
