pub mod chart;
pub mod crypto;
pub mod cryptos;
pub mod health;
pub mod update;
