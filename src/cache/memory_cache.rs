use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use super::CacheBackend;
use crate::error::Error;

/// A cache entry with expiration time
struct CacheEntry {
    data: String,
    expires_at: Instant,
}

/// In-process cache with a TTL per entry
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all expired entries from the cache
    pub async fn cleanup_expired(&self) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Ok(Some(entry.data.clone()));
            }
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: u64,
    ) -> Result<(), Error> {
        let ttl = Duration::from_secs(ttl_seconds.max(1));
        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            Error::ConfigurationError(format!(
                "cache ttl of {} seconds is out of range",
                ttl_seconds
            ))
        })?;

        self.cleanup_expired().await;

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: value,
                expires_at,
            },
        );
        Ok(())
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache").finish()
    }
}
