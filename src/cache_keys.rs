//! Centralized cache key constants
//!
//! Keys shared by the controllers and the refresh task are defined here so
//! both write to and read from the same entries.

pub const CRYPTOS: &str = "cryptos";

pub fn crypto(id: &str) -> String {
    format!("crypto:{}", id)
}

pub fn chart(id: &str, days: u16) -> String {
    format!("chart:{}:{}", id, days)
}
