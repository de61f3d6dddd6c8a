//! Redis-backed cache store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::info;

use crate::{CacheError, CacheStore};

/// Production cache backed by a Redis server.
///
/// Holds a [`ConnectionManager`], which multiplexes a single reconnecting
/// connection across clones.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to `host:port`. Fails when the server is unreachable, so a
    /// misconfigured backend is caught at startup rather than per request.
    pub async fn connect(host: &str, port: u16) -> Result<Self, CacheError> {
        let client = redis::Client::open(format!("redis://{host}:{port}"))
            .map_err(|e| CacheError::Backend(format!("invalid redis address: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Backend(format!("redis connect failed: {e}")))?;
        info!("Connected to redis at {}:{}", host, port);
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| CacheError::Backend(format!("GET {key}: {e}")))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Backend(format!("SETEX {key}: {e}")))
    }
}
