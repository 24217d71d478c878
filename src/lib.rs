pub mod db;

pub mod holdings;
pub mod ledger;
pub mod market_data;
pub mod orders;
pub mod performance;
pub mod portfolio;
pub mod snapshot;
pub mod watchlist;

pub mod constants;
pub mod errors;
pub mod schema;
pub mod utils;

pub use errors::{Error, Result};
pub use portfolio::*;
pub use orders::*;
