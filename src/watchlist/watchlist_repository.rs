use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::watchlist::watchlist_model::{WatchlistEntry, WatchlistEntryDb};

pub trait WatchlistRepositoryTrait: Send + Sync {
    /// Upserts one day's entries into the master log, keyed by
    /// `(entry_date, ticker)`. Re-running a day replaces its rows.
    fn upsert_entries(&self, entries: &[WatchlistEntry]) -> Result<()>;

    fn entries_on(&self, date: NaiveDate) -> Result<Vec<WatchlistEntry>>;

    /// Log rows within `[start, end]`, ordered by date then ticker.
    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<WatchlistEntry>>;

    /// Trailing window fallback when a date range matched nothing: the most
    /// recent `limit` log rows at or before `date`, oldest first.
    fn recent_entries_on_or_before(
        &self,
        date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<WatchlistEntry>>;

    /// Most recent logged base-currency close for `ticker` strictly before
    /// `date`; `None` when the symbol has no usable history yet.
    fn previous_close_base(&self, symbol: &str, date: NaiveDate) -> Result<Option<Decimal>>;
}

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl WatchlistRepositoryTrait for WatchlistRepository {
    fn upsert_entries(&self, entries: &[WatchlistEntry]) -> Result<()> {
        use crate::schema::watchlist_entries::dsl::*;

        if entries.is_empty() {
            return Ok(());
        }
        let db_models: Vec<WatchlistEntryDb> = entries
            .iter()
            .map(|e| WatchlistEntryDb::from(e.clone()))
            .collect();
        let mut conn = get_connection(&self.pool)?;
        debug!(
            "Upserting {} watchlist entries for {}",
            db_models.len(),
            entries[0].entry_date
        );
        diesel::replace_into(watchlist_entries)
            .values(&db_models)
            .execute(&mut conn)?;
        Ok(())
    }

    fn entries_on(&self, date: NaiveDate) -> Result<Vec<WatchlistEntry>> {
        use crate::schema::watchlist_entries::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist_entries
            .filter(entry_date.eq(date.format("%Y-%m-%d").to_string()))
            .order(ticker.asc())
            .load::<WatchlistEntryDb>(&mut conn)?;
        Ok(rows.into_iter().map(WatchlistEntry::from).collect())
    }

    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<WatchlistEntry>> {
        use crate::schema::watchlist_entries::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist_entries
            .filter(entry_date.ge(start.format("%Y-%m-%d").to_string()))
            .filter(entry_date.le(end.format("%Y-%m-%d").to_string()))
            .order((entry_date.asc(), ticker.asc()))
            .load::<WatchlistEntryDb>(&mut conn)?;
        Ok(rows.into_iter().map(WatchlistEntry::from).collect())
    }

    fn recent_entries_on_or_before(
        &self,
        date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<WatchlistEntry>> {
        use crate::schema::watchlist_entries::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let mut rows = watchlist_entries
            .filter(entry_date.le(date.format("%Y-%m-%d").to_string()))
            .order((entry_date.desc(), ticker.desc()))
            .limit(limit)
            .load::<WatchlistEntryDb>(&mut conn)?;
        rows.reverse();
        Ok(rows.into_iter().map(WatchlistEntry::from).collect())
    }

    fn previous_close_base(&self, symbol: &str, date: NaiveDate) -> Result<Option<Decimal>> {
        use crate::schema::watchlist_entries::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let row = watchlist_entries
            .filter(ticker.eq(symbol))
            .filter(entry_date.lt(date.format("%Y-%m-%d").to_string()))
            .filter(close_base.is_not_null())
            .order(entry_date.desc())
            .select(close_base)
            .first::<Option<String>>(&mut conn)
            .optional()?;
        Ok(row
            .flatten()
            .and_then(|s| Decimal::from_str(&s).ok()))
    }
}
