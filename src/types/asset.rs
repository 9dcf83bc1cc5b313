use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CoinGeckoMarket;

/// Normalized market data for one tracked cryptocurrency.
///
/// Records built from the provider carry no timestamps; records read back
/// from the database always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CoinGeckoMarket> for Asset {
    fn from(market: CoinGeckoMarket) -> Self {
        Asset {
            id: market.id,
            name: market.name,
            symbol: market.symbol.to_uppercase(),
            current_price: market.current_price.unwrap_or_default(),
            market_cap: market.market_cap.unwrap_or_default(),
            total_volume: market.total_volume.unwrap_or_default(),
            price_change_percentage_24h: market
                .price_change_percentage_24h
                .unwrap_or_default(),
            image: Some(market.image.unwrap_or_default()),
            last_updated: None,
            created_at: None,
        }
    }
}
