use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::{ApiContext, ApiError},
    handler::crypto_refresh::update_crypto_data,
};

#[post("/cryptos/update")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, ApiError> {
    let updated_count = update_crypto_data(state.get_ref())
        .await
        .api_context("Failed to update cryptocurrency data")?;

    Ok(web::Json(Response {
        message: String::from("Cryptocurrency data updated successfully"),
        updated_count,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub message: String,
    pub updated_count: usize,
}
