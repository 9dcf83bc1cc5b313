use std::{fs, time::Duration};

use tracing::info;

use crate::{
    configuration::Config,
    dao::{get_path, PoolOption, PoolType},
    error::Error,
    model::{Cryptocurrency, Table},
};

const SCHEMA_FILES: [&str; 1] = ["cryptocurrencies.sql"];

#[derive(Debug)]
pub struct DatabasePool {
    pub cryptocurrency: Table<Cryptocurrency>,
    pub pool: PoolType,
}

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let pool = Self::pool_options(config)
            .connect(config.database_url.as_str())
            .await?;

        Ok(Self::from_pool(pool))
    }

    /// Pool that opens its first connection on first use.
    pub fn new_lazy(config: &Config) -> Result<DatabasePool, Error> {
        let pool =
            Self::pool_options(config).connect_lazy(&config.database_url)?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PoolType) -> DatabasePool {
        DatabasePool {
            cryptocurrency: Table::new(pool.clone()),
            pool,
        }
    }

    fn pool_options(config: &Config) -> PoolOption {
        PoolOption::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout))
    }

    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        info!("Database connected successfully");
        Ok(())
    }

    pub async fn init_migrations(&self) -> Result<(), Error> {
        let dir = env!("CARGO_MANIFEST_DIR");

        for file in SCHEMA_FILES {
            let data = fs::read_to_string(get_path(dir, file))?;
            sqlx::query(data.as_str()).execute(&self.pool).await?;
        }

        info!("Database table \"cryptocurrencies\" created/verified");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
