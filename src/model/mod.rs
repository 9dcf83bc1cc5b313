//! Database models

mod cryptocurrency;
mod table;

pub use cryptocurrency::Cryptocurrency;
pub use table::Table;
