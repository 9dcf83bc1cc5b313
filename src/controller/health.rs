use actix_web::{get, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::configuration::{AppState, State};

#[get("/health")]
async fn index(state: web::Data<AppState<State>>) -> impl Responder {
    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

    let cache = if state.cache.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    web::Json(Response {
        status: "OK",
        message: "CryptoTracker API is running",
        timestamp: Utc::now(),
        version: VERSION,
        cache,
    })
}

#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub status: &'a str,
    pub message: &'a str,
    pub timestamp: DateTime<Utc>,
    pub version: Option<&'a str>,
    pub cache: &'a str,
}
