use chrono::NaiveDate;

use crate::errors::Result;
use crate::market_data::market_data_model::PriceSnapshot;

/// Seam to the external market-data collaborator. Implementations may return a
/// snapshot for an earlier date than requested (bounded look-back); `None`
/// means no usable snapshot exists within the look-back window, which the
/// caller treats as degraded data rather than a failure.
pub trait PriceProviderTrait: Send + Sync {
    fn get_price_snapshot(&self, date: NaiveDate) -> Result<Option<PriceSnapshot>>;
}
