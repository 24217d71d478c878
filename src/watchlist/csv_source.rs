use log::debug;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::watchlist::watchlist_traits::WatchlistSourceTrait;

/// Watchlist source backed by a CSV file with at least a `ticker` column.
pub struct CsvWatchlistSource {
    path: PathBuf,
}

impl CsvWatchlistSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WatchlistSourceTrait for CsvWatchlistSource {
    fn get_tickers(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            debug!("No watchlist file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let ticker_idx = reader
            .headers()?
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("ticker"))
            .ok_or_else(|| {
                Error::MissingData(format!(
                    "watchlist {} is missing the 'ticker' column",
                    self.path.display()
                ))
            })?;

        let mut tickers = Vec::new();
        for row in reader.records() {
            let row = row?;
            let ticker = row.get(ticker_idx).unwrap_or("").trim();
            if !ticker.is_empty() {
                tickers.push(ticker.to_string());
            }
        }
        debug!(
            "Loaded {} watchlist tickers from {}",
            tickers.len(),
            self.path.display()
        );
        Ok(tickers)
    }
}
