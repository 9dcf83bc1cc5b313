//! Expiring key-value cache in front of the provider and the database.
//!
//! Every failure inside this module is swallowed: a broken or missing
//! backend behaves like an empty cache, and writes become no-ops.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::{
    configuration::{CacheBackendKind, Config},
    error::Error,
};

pub use self::{memory_cache::MemoryCache, redis_cache::RedisCache};

mod memory_cache;
mod redis_cache;

#[async_trait]
pub trait CacheBackend: Send + Sync + Debug {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: u64,
    ) -> Result<(), Error>;

    async fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Cache {
    backend: Option<Box<dyn CacheBackend>>,
    ttl: u64,
}

impl Cache {
    pub fn new(backend: Box<dyn CacheBackend>, ttl: u64) -> Cache {
        Cache {
            backend: Some(backend),
            ttl,
        }
    }

    pub fn disabled(ttl: u64) -> Cache {
        Cache { backend: None, ttl }
    }

    /// Builds the configured backend. Never fails: if Redis cannot be
    /// reached within the retry policy the cache stays disabled for the
    /// lifetime of the process.
    pub async fn connect(config: &Config) -> Cache {
        match config.cache_backend {
            CacheBackendKind::Redis => match RedisCache::connect(config).await
            {
                Ok(redis) => Cache::new(Box::new(redis), config.cache_ttl),
                Err(e) => {
                    warn!("Redis connection failed: {}", e);
                    warn!("Application will continue without caching");
                    Cache::disabled(config.cache_ttl)
                },
            },
            CacheBackendKind::Memory => {
                info!("Using in-process memory cache");
                Cache::new(Box::new(MemoryCache::new()), config.cache_ttl)
            },
            CacheBackendKind::Disabled => {
                info!("Caching disabled by configuration");
                Cache::disabled(config.cache_ttl)
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let backend = self.backend.as_ref()?;

        let data = match backend.get(key).await {
            Ok(data) => data?,
            Err(e) => {
                warn!("Cache error, proceeding without cache: {}", e);
                return None;
            },
        };

        match serde_json::from_str(&data) {
            Ok(value) => {
                debug!("Cache hit: {}", key);
                Some(value)
            },
            Err(e) => {
                warn!("Cache entry {} could not be decoded: {}", key, e);
                None
            },
        }
    }

    /// Stores `value` with the configured default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        self.set_ex(key, value, self.ttl).await
    }

    pub async fn set_ex<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };

        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cache entry {} could not be encoded: {}", key, e);
                return;
            },
        };

        if let Err(e) = backend.set(key, data, ttl_seconds).await {
            warn!("Cache store error: {}", e);
        }
    }

    pub async fn close(&self) {
        if let Some(backend) = self.backend.as_ref() {
            if let Err(e) = backend.close().await {
                warn!("Cache close error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug)]
    struct UnavailableBackend;

    #[async_trait]
    impl CacheBackend for UnavailableBackend {
        async fn get(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::ServerError(String::from("connection is not ready")))
        }

        async fn set(
            &self,
            _key: &str,
            _value: String,
            _ttl_seconds: u64,
        ) -> Result<(), Error> {
            Err(Error::ServerError(String::from("connection is not ready")))
        }
    }

    #[tokio::test]
    async fn unavailable_backend_behaves_like_a_miss() {
        let cache = Cache::new(Box::new(UnavailableBackend), 60);

        cache.set("cryptos", &vec![1, 2, 3]).await;
        let value: Option<Vec<i32>> = cache.get("cryptos").await;

        assert!(cache.is_enabled());
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn disabled_cache_returns_nothing() {
        let cache = Cache::disabled(60);

        cache.set("cryptos", &vec![1, 2, 3]).await;
        let value: Option<Vec<i32>> = cache.get("cryptos").await;

        assert!(!cache.is_enabled());
        assert!(value.is_none());
        cache.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn value_round_trips_within_ttl_only() {
        let cache = Cache::new(Box::new(MemoryCache::new()), 60);

        cache
            .set_ex("crypto:bitcoin", &String::from("Bitcoin"), 5)
            .await;
        let value: Option<String> = cache.get("crypto:bitcoin").await;
        assert_eq!(value.as_deref(), Some("Bitcoin"));

        tokio::time::advance(Duration::from_secs(5)).await;
        let value: Option<String> = cache.get("crypto:bitcoin").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn huge_ttl_is_swallowed_as_a_store_error() {
        let cache = Cache::new(Box::new(MemoryCache::new()), u64::MAX);

        cache.set("cryptos", &vec![1, 2, 3]).await;
        let value: Option<Vec<i32>> = cache.get("cryptos").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn undecodable_entry_is_a_miss() {
        let cache = Cache::new(Box::new(MemoryCache::new()), 60);

        cache.set("cryptos", &String::from("not a list")).await;
        let value: Option<Vec<i32>> = cache.get("cryptos").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn memory_backend_from_config() {
        let config = Config {
            cache_backend: CacheBackendKind::Memory,
            cache_ttl: 42,
            ..Config::default()
        };

        let cache = Cache::connect(&config).await;
        assert!(cache.is_enabled());
        assert_eq!(cache.ttl(), 42);
    }

    #[tokio::test]
    async fn unreachable_redis_disables_cache() {
        let config = Config {
            cache_backend: CacheBackendKind::Redis,
            redis_url: String::from("redis://127.0.0.1:1"),
            redis_max_retries: 1,
            redis_max_delay_ms: 10,
            redis_max_retry_time: 5,
            timeout: 1,
            ..Config::default()
        };

        let cache = Cache::connect(&config).await;
        assert!(!cache.is_enabled());
    }
}
