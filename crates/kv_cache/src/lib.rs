//! Key/value caching layer for upstream weather responses.
//!
//! Provides the [`CacheStore`] trait with two implementations:
//! - [`RedisCache`]: production Redis-backed store
//! - [`MemoryCache`]: in-process store with the same TTL semantics,
//!   used by tests and local development

mod memory;
mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a cache backend.
///
/// A backend error is not a miss. Callers that want soft-fail reads make
/// that decision themselves; the distinction stays visible in logs.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// String key/value store with a per-entry time-to-live.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a key. `Ok(None)` is a true miss; an entry past its TTL is
    /// indistinguishable from an absent one.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value under `key` for `ttl`, overwriting any previous entry.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
