use actix_web::{get, web, Responder};
use tracing::info;

use crate::{
    cache_keys,
    configuration::{AppState, State},
    handler::crypto_refresh,
    types::Asset,
};

/// The provider, not the database, is the source for this list on a miss.
#[get("/cryptos")]
async fn index(state: web::Data<AppState<State>>) -> impl Responder {
    if let Some(cached) =
        state.cache.get::<Vec<Asset>>(cache_keys::CRYPTOS).await
    {
        info!("Returning cryptocurrencies from cache");
        return web::Json(cached);
    }

    info!("No cache found, fetching from CoinGecko");
    let data = state.provider.fetch_assets().await;

    state.cache.set(cache_keys::CRYPTOS, &data).await;
    crypto_refresh::spawn_upsert_all(state.get_ref().clone(), data.clone());

    web::Json(data)
}
