use crate::errors::Result;
use crate::holdings::holdings_model::Holding;

/// Source of the authoritative target composition. A missing table or missing
/// mandatory columns is fatal to the run: the ledger must not be written from
/// partial holdings.
pub trait HoldingsSourceTrait: Send + Sync {
    fn get_holdings(&self) -> Result<Vec<Holding>>;
}
