use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::DEFAULT_BASE_CURRENCY;
use crate::market_data::market_data_model::PriceSnapshot;

/// One observed watchlist price, keyed by `(entry_date, ticker)` in the
/// append-only master log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub entry_date: NaiveDate,
    pub ticker: String,
    pub close: Option<Decimal>,
    pub currency: String,
    pub close_base: Option<Decimal>,
    pub in_portfolio: bool,
}

impl WatchlistEntry {
    /// Joins the tracked tickers against a price table. Tickers with no price
    /// row still get an entry so their absence is visible in the log.
    pub fn join_prices(
        tickers: &[String],
        prices: &PriceSnapshot,
        held_tickers: &HashSet<String>,
    ) -> Vec<WatchlistEntry> {
        tickers
            .iter()
            .map(|ticker| {
                let record = prices.records.iter().find(|r| &r.ticker == ticker);
                WatchlistEntry {
                    entry_date: prices.as_of,
                    ticker: ticker.clone(),
                    close: record.and_then(|r| r.close),
                    currency: record
                        .map(|r| r.currency.clone())
                        .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string()),
                    close_base: record.and_then(|r| r.close_base),
                    in_portfolio: held_tickers.contains(&ticker.to_uppercase()),
                }
            })
            .collect()
    }
}

// --- DB Representation ---

#[derive(Debug, Clone, Queryable, QueryableByName, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::watchlist_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntryDb {
    pub id: String,
    pub entry_date: String,
    pub ticker: String,
    pub close: Option<String>,
    pub currency: String,
    pub close_base: Option<String>,
    pub in_portfolio: bool,
}

impl From<WatchlistEntryDb> for WatchlistEntry {
    fn from(db: WatchlistEntryDb) -> Self {
        Self {
            entry_date: NaiveDate::parse_from_str(&db.entry_date, "%Y-%m-%d").unwrap_or_default(),
            ticker: db.ticker,
            close: db.close.as_deref().and_then(|s| s.parse().ok()),
            currency: db.currency,
            close_base: db.close_base.as_deref().and_then(|s| s.parse().ok()),
            in_portfolio: db.in_portfolio,
        }
    }
}

impl From<WatchlistEntry> for WatchlistEntryDb {
    fn from(domain: WatchlistEntry) -> Self {
        let entry_date = domain.entry_date.format("%Y-%m-%d").to_string();
        Self {
            id: format!("{}_{}", entry_date, domain.ticker),
            entry_date,
            ticker: domain.ticker,
            close: domain.close.map(|d| d.to_string()),
            currency: domain.currency,
            close_base: domain.close_base.map(|d| d.to_string()),
            in_portfolio: domain.in_portfolio,
        }
    }
}
