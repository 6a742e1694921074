//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// A non-positive capacity is kept as 0 so the cache rejects it at
    /// construction instead of silently falling back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var::<i64>("CACHE_CAPACITY")
                .map(|v| usize::try_from(v).unwrap_or(0))
                .unwrap_or(defaults.capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            server_port: 3000,
        }
    }
}
