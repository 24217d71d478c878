pub mod csv_source;
pub mod holdings_model;
pub mod holdings_traits;
pub mod valuation_service;


pub use csv_source::CsvHoldingsSource;
pub use holdings_model::{
    Holding, PortfolioValuation, PositionValuation, StopLossRule, StopLossState,
};
pub use holdings_traits::HoldingsSourceTrait;
pub use valuation_service::value_holdings;
