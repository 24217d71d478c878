use chrono::{Duration, NaiveDate};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::constants::PRICE_LOOKBACK_DAYS;
use crate::errors::Result;
use crate::market_data::market_data_model::{PriceRecord, PriceSnapshot};
use crate::market_data::market_data_traits::PriceProviderTrait;
use crate::utils::parse::parse_decimal_lenient;
use crate::utils::time_utils::compact_date;

/// File-based price provider reading `prices_raw_YYYYMMDD.csv` tables written
/// by the external fetcher. Walks back day by day until a file is found or the
/// look-back window is exhausted.
pub struct CsvPriceProvider {
    prices_dir: PathBuf,
    base_currency: String,
    lookback_days: u32,
}

impl CsvPriceProvider {
    pub fn new(prices_dir: impl AsRef<Path>, base_currency: &str) -> Self {
        Self {
            prices_dir: prices_dir.as_ref().to_path_buf(),
            base_currency: base_currency.to_uppercase(),
            lookback_days: PRICE_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.prices_dir
            .join(format!("prices_raw_{}.csv", compact_date(date)))
    }

    fn read_file(&self, path: &Path, as_of: NaiveDate) -> Result<PriceSnapshot> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let idx = |name: &str| headers.iter().position(|h| h == name);

        let ticker_idx = idx("ticker");
        let close_idx = idx("close");
        let currency_idx = idx("currency");
        // The fetcher names the converted column after the base currency
        // ("close_sek" for SEK); accept a plain "close_base" as well.
        let base_col = format!("close_{}", self.base_currency.to_lowercase());
        let close_base_idx = idx(&base_col).or_else(|| idx("close_base"));

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |i: Option<usize>| i.and_then(|i| row.get(i)).unwrap_or("");

            let ticker = field(ticker_idx).trim().to_string();
            if ticker.is_empty() {
                continue;
            }

            let close = parse_decimal_lenient(field(close_idx));
            let currency = {
                let c = field(currency_idx).trim().to_uppercase();
                if c.is_empty() {
                    self.base_currency.clone()
                } else {
                    c
                }
            };
            let mut close_base = parse_decimal_lenient(field(close_base_idx));
            // No conversion on file: a base-currency close is its own conversion.
            if close_base.is_none() && currency == self.base_currency {
                close_base = close;
            }

            records.push(PriceRecord {
                ticker,
                close,
                currency,
                close_base,
            });
        }

        Ok(PriceSnapshot { as_of, records })
    }
}

impl PriceProviderTrait for CsvPriceProvider {
    fn get_price_snapshot(&self, date: NaiveDate) -> Result<Option<PriceSnapshot>> {
        for back in 0..self.lookback_days {
            let candidate = date - Duration::days(back as i64);
            let path = self.file_for(candidate);
            if path.exists() {
                debug!("Loading price snapshot {}", path.display());
                return self.read_file(&path, candidate).map(Some);
            }
        }
        warn!(
            "No price file within {} days before {} in {}",
            self.lookback_days,
            date,
            self.prices_dir.display()
        );
        Ok(None)
    }
}
