use actix_web::{get, web, Responder};
use tracing::info;

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::{ApiContext, ApiError, Error},
    types::Asset,
};

const ERROR_MESSAGE: &str = "Failed to fetch cryptocurrency";

/// Unlike the list endpoint, a miss here reads from the database.
#[get("/cryptos/{id}")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let cache_key = cache_keys::crypto(&id);

    if let Some(cached) = state.cache.get::<Asset>(&cache_key).await {
        info!("Returning {} from cache", &id);
        return Ok(web::Json(cached));
    }

    let crypto = state
        .database
        .cryptocurrency
        .get_by_id(&id)
        .await
        .api_context(ERROR_MESSAGE)?;

    let crypto = match crypto {
        Some(crypto) => crypto,
        None => {
            return Err(ApiError::new(ERROR_MESSAGE, Error::NotFound(id)));
        },
    };

    state.cache.set(&cache_key, &crypto).await;

    Ok(web::Json(crypto))
}
