//! Market-data adapter over the CoinGecko HTTP API.
//!
//! Fetching the tracked assets never fails: any upstream problem is logged
//! and answered with a fixed sample set. Callers that only use
//! [`MarketProvider::fetch_assets`] cannot tell live data from the fallback;
//! [`MarketProvider::fetch`] keeps the distinction.

use tracing::{info, warn};

use super::HTTP;
use crate::{
    configuration::Config,
    error::Error,
    types::{Asset, ChartPoint, CoinGeckoMarketData},
};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Live(Vec<Asset>),
    Fallback(Vec<Asset>),
}

impl FetchResult {
    pub fn is_live(&self) -> bool {
        matches!(self, FetchResult::Live(_))
    }

    pub fn assets(&self) -> &[Asset] {
        match self {
            FetchResult::Live(assets) | FetchResult::Fallback(assets) => {
                assets
            },
        }
    }

    pub fn into_assets(self) -> Vec<Asset> {
        match self {
            FetchResult::Live(assets) | FetchResult::Fallback(assets) => {
                assets
            },
        }
    }
}

#[derive(Debug)]
pub struct MarketProvider {
    pub http: HTTP,
    pub ids: Vec<String>,
}

impl MarketProvider {
    pub fn new(config: Config) -> Result<MarketProvider, Error> {
        let ids = config.crypto_ids.clone();
        let http = HTTP::new(config)?;

        Ok(MarketProvider { http, ids })
    }

    pub async fn fetch(&self) -> FetchResult {
        info!("Fetching cryptocurrency data from CoinGecko");

        match self.http.get_coingecko_markets(&self.ids).await {
            Ok(markets) => {
                let assets: Vec<Asset> =
                    markets.into_iter().map(Asset::from).collect();
                info!(
                    "Successfully fetched {} cryptocurrencies from CoinGecko",
                    assets.len()
                );
                FetchResult::Live(assets)
            },
            Err(e) => {
                warn!("Error fetching from CoinGecko: {}", e);
                warn!("Using fallback sample data");
                FetchResult::Fallback(fallback_assets())
            },
        }
    }

    pub async fn fetch_assets(&self) -> Vec<Asset> {
        self.fetch().await.into_assets()
    }

    /// Price history straight from the provider. Errors yield an empty
    /// series.
    pub async fn fetch_chart(&self, id: &str, days: u16) -> Vec<ChartPoint> {
        match self.http.get_coingecko_market_chart(id, days).await {
            Ok(data) => to_chart_points(&data),
            Err(e) => {
                warn!("Error fetching chart data for {}: {}", id, e);
                vec![]
            },
        }
    }

    pub async fn test_connection(&self) -> bool {
        match self.http.ping().await {
            Ok(()) => {
                info!("CoinGecko API connection successful");
                true
            },
            Err(e) => {
                warn!("CoinGecko API connection failed: {}", e);
                warn!("Will use sample data as fallback");
                false
            },
        }
    }
}

/// Each point carries the percentage change from the previous point; the
/// first point and points after a zero price report 0.
pub fn to_chart_points(data: &CoinGeckoMarketData) -> Vec<ChartPoint> {
    let mut previous: Option<f64> = None;

    data.prices
        .iter()
        .map(|item| {
            let price = item.1;
            let percentage_change = match previous {
                Some(prev) if prev != 0.0 => (price - prev) / prev * 100.0,
                _ => 0.0,
            };
            previous = Some(price);

            ChartPoint {
                timestamp: item.0,
                price,
                percentage_change,
            }
        })
        .collect()
}

pub fn fallback_assets() -> Vec<Asset> {
    let data = [
        (
            "bitcoin",
            "Bitcoin",
            "BTC",
            43250.50,
            847250000000.0,
            23450000000.0,
            2.45,
            "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        ),
        (
            "ethereum",
            "Ethereum",
            "ETH",
            2650.75,
            318750000000.0,
            15230000000.0,
            -1.23,
            "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
        ),
        (
            "litecoin",
            "Litecoin",
            "LTC",
            72.30,
            5350000000.0,
            425000000.0,
            0.87,
            "https://assets.coingecko.com/coins/images/2/large/litecoin.png",
        ),
        (
            "cardano",
            "Cardano",
            "ADA",
            0.45,
            15800000000.0,
            320000000.0,
            1.15,
            "https://assets.coingecko.com/coins/images/975/large/cardano.png",
        ),
        (
            "solana",
            "Solana",
            "SOL",
            98.50,
            42600000000.0,
            1250000000.0,
            -0.75,
            "https://assets.coingecko.com/coins/images/4128/large/solana.png",
        ),
    ];

    data.into_iter()
        .map(
            |(id, name, symbol, price, market_cap, volume, change, image)| {
                Asset {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    symbol: symbol.to_owned(),
                    current_price: price,
                    market_cap,
                    total_volume: volume,
                    price_change_percentage_24h: change,
                    image: Some(image.to_owned()),
                    last_updated: None,
                    created_at: None,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarketData;

    fn unreachable_provider() -> MarketProvider {
        let config = Config {
            coingecko_url: String::from("http://127.0.0.1:1/api/v3"),
            timeout: 2,
            ..Config::default()
        };
        MarketProvider::new(config).unwrap()
    }

    #[test]
    fn fallback_has_five_sample_assets() {
        let assets = fallback_assets();
        let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["bitcoin", "ethereum", "litecoin", "cardano", "solana"]
        );
        assert!(assets.iter().all(|a| a.symbol == a.symbol.to_uppercase()));
        assert_eq!(assets[1].price_change_percentage_24h, -1.23);
    }

    #[tokio::test]
    async fn unreachable_provider_returns_fallback() {
        let provider = unreachable_provider();

        let result = provider.fetch().await;
        assert!(!result.is_live());
        assert_eq!(result.assets(), fallback_assets().as_slice());

        let assets = provider.fetch_assets().await;
        assert_eq!(assets.len(), 5);
    }

    #[tokio::test]
    async fn unreachable_provider_yields_empty_chart() {
        let provider = unreachable_provider();

        assert!(provider.fetch_chart("bitcoin", 7).await.is_empty());
        assert!(!provider.test_connection().await);
    }

    #[test]
    fn chart_points_carry_change_from_previous_point() {
        let data = CoinGeckoMarketData {
            prices: vec![
                MarketData(1_000, 100.0),
                MarketData(2_000, 110.0),
                MarketData(3_000, 99.0),
            ],
            market_caps: vec![],
            total_volumes: vec![],
        };

        let points = to_chart_points(&data);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].percentage_change, 0.0);
        assert!((points[1].percentage_change - 10.0).abs() < 1e-9);
        assert!((points[2].percentage_change + 10.0).abs() < 1e-9);
        assert_eq!(points[2].timestamp, 3_000);
    }

    #[test]
    fn chart_points_after_zero_price_report_no_change() {
        let data = CoinGeckoMarketData {
            prices: vec![MarketData(1, 0.0), MarketData(2, 5.0)],
            market_caps: vec![],
            total_volumes: vec![],
        };

        let points = to_chart_points(&data);
        assert_eq!(points[1].percentage_change, 0.0);
    }

    #[test]
    fn market_chart_body_decodes() {
        let data: CoinGeckoMarketData = serde_json::from_str(
            r#"{"prices": [[1700000000000, 43000.5], [1700003600000, 43100.0]]}"#,
        )
        .unwrap();

        let points = to_chart_points(&data);
        assert_eq!(points[0].timestamp, 1_700_000_000_000);
        assert_eq!(points[1].price, 43100.0);
    }
}
