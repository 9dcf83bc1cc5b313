use std::time::Duration;

use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands,
};
use tokio::time;
use tracing::info;

use super::CacheBackend;
use crate::{configuration::Config, error::Error};

/// Backoff is `RETRY_FACTOR_MS * RETRY_EXPONENT_BASE ^ attempt`, capped at
/// `Config::redis_max_delay_ms`.
const RETRY_FACTOR_MS: u64 = 100;
const RETRY_EXPONENT_BASE: u64 = 2;

/// Redis-backed cache over one long-lived, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connects with the configured retry policy. The whole attempt,
    /// retries included, is bounded by `redis_max_retry_time`.
    pub async fn connect(config: &Config) -> Result<RedisCache, Error> {
        info!("Redis client connecting to {}", &config.redis_url);

        let client = redis::Client::open(config.redis_url.as_str())?;
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(config.redis_max_retries)
            .set_exponent_base(RETRY_EXPONENT_BASE)
            .set_factor(RETRY_FACTOR_MS)
            .set_max_delay(config.redis_max_delay_ms)
            .set_connection_timeout(Duration::from_secs(config.timeout))
            .set_response_timeout(Duration::from_secs(config.timeout));

        let connection = time::timeout(
            Duration::from_secs(config.redis_max_retry_time),
            ConnectionManager::new_with_config(client, manager_config),
        )
        .await??;

        info!("Redis client ready");

        Ok(RedisCache { connection })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;
        Ok(value)
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: u64,
    ) -> Result<(), Error> {
        let mut connection = self.connection.clone();
        let _: () = connection.set_ex(key, value, ttl_seconds.max(1)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), Error> {
        let mut connection = self.connection.clone();
        let _: () = redis::cmd("QUIT").query_async(&mut connection).await?;
        info!("Redis connection ended");
        Ok(())
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish()
    }
}
