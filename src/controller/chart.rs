use actix_web::{get, web, Responder};
use serde::Deserialize;

use crate::{
    cache_keys,
    configuration::{AppState, State},
    types::ChartPoint,
};

const DEFAULT_DAYS: u16 = 7;
const MAX_DAYS: u16 = 365;

/// Price history comes straight from the provider and never touches the
/// database.
#[get("/cryptos/{id}/chart")]
async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Query<Query>,
) -> impl Responder {
    let id = path.into_inner();
    let days = parse_days(data.days.as_deref());
    let cache_key = cache_keys::chart(&id, days);

    if let Some(cached) = state.cache.get::<Vec<ChartPoint>>(&cache_key).await
    {
        return web::Json(cached);
    }

    let points = state.provider.fetch_chart(&id, days).await;

    if !points.is_empty() {
        state.cache.set(&cache_key, &points).await;
    }

    web::Json(points)
}

/// Missing or non-numeric values fall back to the default window; numbers
/// outside `1..=MAX_DAYS` are clamped.
fn parse_days(days: Option<&str>) -> u16 {
    match days.map(|value| value.trim().parse::<i64>()) {
        Some(Ok(days)) => days.clamp(1, i64::from(MAX_DAYS)) as u16,
        _ => DEFAULT_DAYS,
    }
}

#[derive(Debug, Deserialize)]
pub struct Query {
    days: Option<String>,
}
