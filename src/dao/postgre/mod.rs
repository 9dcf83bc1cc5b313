pub use self::{
    path::get_path,
    types::{PoolOption, PoolType, QueryResult},
};

mod cryptocurrency;
mod path;
mod types;
