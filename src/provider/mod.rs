pub use self::{
    database::DatabasePool,
    http::HTTP,
    market::{fallback_assets, FetchResult, MarketProvider},
};

mod database;
mod http;
mod market;
