use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::{
    configuration::Config,
    error::Error,
    types::{CoinGeckoMarket, CoinGeckoMarketData},
};

const MARKETS_PER_PAGE: &str = "10";
const PING_TIMEOUT_SECS: u64 = 5;

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(HTTP { config, http })
    }

    pub async fn get_coingecko_markets(
        &self,
        ids: &[String],
    ) -> Result<Vec<CoinGeckoMarket>, Error> {
        let url = self.config.get_markets_url();
        let ids = ids.join(",");
        let response = self
            .http
            .get(url)
            .query(&[
                ("vs_currency", self.config.vs_currency.as_str()),
                ("ids", ids.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", MARKETS_PER_PAGE),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Error::ProviderStatus(response.status().as_u16()));
        }

        let json = response.json::<Vec<CoinGeckoMarket>>().await?;
        Ok(json)
    }

    pub async fn get_coingecko_market_chart(
        &self,
        id: &str,
        days: u16,
    ) -> Result<CoinGeckoMarketData, Error> {
        let url = self.config.get_market_chart_url(id);
        let days = days.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("vs_currency", self.config.vs_currency.as_str()),
                ("days", days.as_str()),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Error::ProviderStatus(response.status().as_u16()));
        }

        let json = response.json::<CoinGeckoMarketData>().await?;
        Ok(json)
    }

    pub async fn ping(&self) -> Result<(), Error> {
        let url = self.config.get_ping_url();
        let response = self
            .http
            .get(url)
            .timeout(Duration::from_secs(PING_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::ProviderStatus(response.status().as_u16()));
        }

        Ok(())
    }
}
