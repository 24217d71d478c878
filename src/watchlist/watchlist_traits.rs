use crate::errors::Result;

/// Source of the tracked ticker universe. Unlike holdings, a missing
/// watchlist only degrades the run (no movers), so errors here are real
/// I/O failures rather than absence.
pub trait WatchlistSourceTrait: Send + Sync {
    fn get_tickers(&self) -> Result<Vec<String>>;
}
