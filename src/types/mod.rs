pub use self::{
    asset::Asset,
    chart_point::ChartPoint,
    coin_gecko_market::CoinGeckoMarket,
    coin_gecko_market_data::{CoinGeckoMarketData, MarketData},
};

mod asset;
mod chart_point;
mod coin_gecko_market;
mod coin_gecko_market_data;
