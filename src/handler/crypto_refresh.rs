//! Fetch -> cache -> persist pipeline shared by the scheduler, the startup
//! run and the manual update endpoint.

use futures::future::join_all;
use tokio::{time, time::Duration};
use tracing::{error, info};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    provider::DatabasePool,
    types::Asset,
};

/// Runs one refresh and returns the number of assets written.
pub async fn update_crypto_data(
    app_state: &AppState<State>,
) -> Result<usize, Error> {
    info!("Starting cryptocurrency data update");

    let assets = app_state.provider.fetch_assets().await;
    app_state.cache.set(cache_keys::CRYPTOS, &assets).await;
    upsert_all(&app_state.database, &assets).await?;

    info!("Successfully updated {} cryptocurrencies", assets.len());
    Ok(assets.len())
}

/// Upserts every asset concurrently. All statements run to completion; a
/// failed one does not undo the others and the first error is returned.
pub async fn upsert_all(
    database: &DatabasePool,
    assets: &[Asset],
) -> Result<(), Error> {
    let joins = assets
        .iter()
        .map(|asset| database.cryptocurrency.upsert(asset));

    let mut result = Ok(());

    for (asset, item) in assets.iter().zip(join_all(joins).await) {
        if let Err(e) = item {
            error!("Error upserting {}: {}", asset.id, e);
            if result.is_ok() {
                result = Err(Error::SQL(e));
            }
        }
    }

    result
}

/// Persists in the background; the caller does not wait for or observe the
/// outcome.
pub fn spawn_upsert_all(app_state: AppState<State>, assets: Vec<Asset>) {
    tokio::spawn(async move {
        let _ = upsert_all(&app_state.database, &assets).await;
    });
}

/// Re-runs [`update_crypto_data`] on a fixed interval. Each run is spawned
/// on its own, so a slow provider can make runs overlap.
pub async fn crypto_refresh_task(
    app_state: AppState<State>,
) -> Result<(), Error> {
    let interval: u64 = app_state.config.refresh_interval;
    let mut interval = time::interval(Duration::from_secs(interval));

    info!(
        "Scheduled automatic updates every {} seconds",
        app_state.config.refresh_interval
    );

    tokio::spawn(async move {
        interval.tick().await;
        loop {
            interval.tick().await;
            let app = app_state.clone();
            tokio::spawn(async move {
                info!("Scheduled update: fetching latest cryptocurrency data");
                if let Err(error) = update_crypto_data(&app).await {
                    error!("Scheduled update failed: {}", error);
                };
            });
        }
    })
    .await?
}
