//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::SharedLruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    SizeResponse,
};

/// Cache type served over HTTP: string keys, arbitrary JSON values.
pub type JsonCache = SharedLruCache<String, Value>;

/// Application state shared across all handlers.
///
/// The cache handle carries its own lock, so the state is cheap to clone.
/// Handlers never hold the lock across an `.await`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe LRU cache
    pub cache: JsonCache,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if the configured
    /// capacity is not positive.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = SharedLruCache::new(config.capacity)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair, evicting the least recently used entry when full.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.put(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// A cached JSON `null` is a hit; only an absent key yields 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_path_key(&key)?;
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_path_key(&key)?;
    match state.cache.remove(&key) {
        Some(value) => Ok(Json(DeleteResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Applies the same key rules as `PUT /set` to a key taken from the path.
fn check_path_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Json<SizeResponse> {
    let (size, capacity) = state.cache.size_and_capacity();
    Json(SizeResponse::new(size, capacity))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
