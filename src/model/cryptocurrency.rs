use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::Asset;

/// Row of the `cryptocurrencies` table. Decimal columns come back as
/// `BigDecimal` and are coerced to `f64` when converted to [`Asset`].
#[derive(Debug, FromRow)]
pub struct Cryptocurrency {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: BigDecimal,
    pub market_cap: Option<i64>,
    pub total_volume: Option<i64>,
    pub price_change_percentage_24h: Option<BigDecimal>,
    pub image: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Cryptocurrency> for Asset {
    fn from(row: Cryptocurrency) -> Self {
        Asset {
            id: row.id,
            name: row.name,
            symbol: row.symbol,
            current_price: row.current_price.to_f64().unwrap_or_default(),
            market_cap: row.market_cap.unwrap_or_default() as f64,
            total_volume: row.total_volume.unwrap_or_default() as f64,
            price_change_percentage_24h: row
                .price_change_percentage_24h
                .and_then(|value| value.to_f64())
                .unwrap_or_default(),
            image: row.image,
            last_updated: Some(row.last_updated),
            created_at: Some(row.created_at),
        }
    }
}
