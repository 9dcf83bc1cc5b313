use serde::Deserialize;

/// Body of `coins/{id}/market_chart`.
#[derive(Debug, Deserialize)]
pub struct CoinGeckoMarketData {
    pub prices: Vec<MarketData>,
    #[serde(default)]
    pub market_caps: Vec<MarketData>,
    #[serde(default)]
    pub total_volumes: Vec<MarketData>,
}

/// `[timestamp_ms, value]`
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct MarketData(pub i64, pub f64);
