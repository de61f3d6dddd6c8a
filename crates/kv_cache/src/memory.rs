//! In-process cache store with the same TTL semantics as the Redis backend.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::{CacheError, CacheStore};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// DashMap-backed store. Entries past their TTL read as absent and are
/// dropped lazily on the next lookup.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let live = self
            .entries
            .get(key)
            .and_then(|entry| (entry.expires_at > Instant::now()).then(|| entry.value.clone()));
        if live.is_none() {
            self.entries.remove(key);
        }
        Ok(live)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_owned(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_owned(), entry);
        Ok(())
    }
}
