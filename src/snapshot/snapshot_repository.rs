use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::snapshot::snapshot_model::{HoldingsSnapshot, HoldingsSnapshotDb};

pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Saves the snapshot for its date. Re-running the same day replaces the
    /// row with identical content, so saves converge.
    fn save_snapshot(&self, snapshot: &HoldingsSnapshot) -> Result<()>;

    fn get_snapshot(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>>;

    /// Most recent snapshot strictly older than `date`; `None` on first run.
    fn get_previous_snapshot(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>>;

    /// Most recent snapshot at or before `date` (weekly boundary fallback).
    fn get_snapshot_on_or_before(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>>;

    fn list_dates(&self) -> Result<Vec<NaiveDate>>;
}

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl SnapshotRepositoryTrait for SnapshotRepository {
    fn save_snapshot(&self, snapshot: &HoldingsSnapshot) -> Result<()> {
        use crate::schema::holdings_snapshots::dsl::*;

        let db_model = HoldingsSnapshotDb::from(snapshot.clone());
        let mut conn = get_connection(&self.pool)?;
        debug!("Saving holdings snapshot for {}", snapshot.snapshot_date);
        diesel::replace_into(holdings_snapshots)
            .values(&db_model)
            .execute(&mut conn)?;
        Ok(())
    }

    fn get_snapshot(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>> {
        use crate::schema::holdings_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let result_db = holdings_snapshots
            .filter(snapshot_date.eq(date.format("%Y-%m-%d").to_string()))
            .first::<HoldingsSnapshotDb>(&mut conn)
            .optional()?;
        Ok(result_db.map(HoldingsSnapshot::from))
    }

    fn get_previous_snapshot(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>> {
        use crate::schema::holdings_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let result_db = holdings_snapshots
            .filter(snapshot_date.lt(date.format("%Y-%m-%d").to_string()))
            .order(snapshot_date.desc())
            .first::<HoldingsSnapshotDb>(&mut conn)
            .optional()?;
        Ok(result_db.map(HoldingsSnapshot::from))
    }

    fn get_snapshot_on_or_before(&self, date: NaiveDate) -> Result<Option<HoldingsSnapshot>> {
        use crate::schema::holdings_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let result_db = holdings_snapshots
            .filter(snapshot_date.le(date.format("%Y-%m-%d").to_string()))
            .order(snapshot_date.desc())
            .first::<HoldingsSnapshotDb>(&mut conn)
            .optional()?;
        Ok(result_db.map(HoldingsSnapshot::from))
    }

    fn list_dates(&self) -> Result<Vec<NaiveDate>> {
        use crate::schema::holdings_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let date_strings = holdings_snapshots
            .select(snapshot_date)
            .order(snapshot_date.asc())
            .load::<String>(&mut conn)?;
        Ok(date_strings
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .collect())
    }
}
