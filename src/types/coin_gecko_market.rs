use serde::Deserialize;

/// One element of the `coins/markets` response. Only the fields the
/// service reads are declared; numeric fields may be `null` upstream.
#[derive(Debug, Deserialize, Clone)]
pub struct CoinGeckoMarket {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub image: Option<String>,
}
