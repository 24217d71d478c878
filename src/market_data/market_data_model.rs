use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a provider price table. `close_base` is the close converted to
/// the base currency; it stays undefined when no conversion was available.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub ticker: String,
    pub close: Option<Decimal>,
    pub currency: String,
    pub close_base: Option<Decimal>,
}

/// Price table for one business day, possibly older than the requested date
/// when the provider had to look back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub as_of: NaiveDate,
    pub records: Vec<PriceRecord>,
}

impl PriceSnapshot {
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Base-currency close by ticker. Missing tickers yield `None`, never an error.
    pub fn close_base(&self, ticker: &str) -> Option<Decimal> {
        self.records
            .iter()
            .find(|r| r.ticker == ticker)
            .and_then(|r| r.close_base)
    }

    /// Ticker -> base-currency close map for bulk joins.
    pub fn close_base_map(&self) -> HashMap<String, Decimal> {
        self.records
            .iter()
            .filter_map(|r| r.close_base.map(|px| (r.ticker.clone(), px)))
            .collect()
    }
}
