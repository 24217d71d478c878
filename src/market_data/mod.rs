pub mod csv_provider;
pub mod market_data_model;
pub mod market_data_traits;

pub use csv_provider::CsvPriceProvider;
pub use market_data_model::{PriceRecord, PriceSnapshot};
pub use market_data_traits::PriceProviderTrait;
