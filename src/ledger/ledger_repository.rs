use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::ledger::ledger_model::{LedgerRow, LedgerRowDb};

pub trait LedgerRepositoryTrait: Send + Sync {
    /// All ledger rows ordered by date ascending.
    fn get_all_rows(&self) -> Result<Vec<LedgerRow>>;

    fn get_row(&self, date: NaiveDate) -> Result<Option<LedgerRow>>;

    /// Persists the full recomputed ledger atomically. The whole table is
    /// replaced because every derived column may shift after a backfill.
    fn replace_rows(&self, rows: &[LedgerRow]) -> Result<()>;
}

pub struct LedgerRepository {
    pool: Arc<DbPool>,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl LedgerRepositoryTrait for LedgerRepository {
    fn get_all_rows(&self) -> Result<Vec<LedgerRow>> {
        use crate::schema::ledger_rows::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let rows = ledger_rows
            .order(date.asc())
            .load::<LedgerRowDb>(&mut conn)?;
        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }

    fn get_row(&self, for_date: NaiveDate) -> Result<Option<LedgerRow>> {
        use crate::schema::ledger_rows::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let row = ledger_rows
            .filter(date.eq(for_date.format("%Y-%m-%d").to_string()))
            .first::<LedgerRowDb>(&mut conn)
            .optional()?;
        Ok(row.map(LedgerRow::from))
    }

    fn replace_rows(&self, rows: &[LedgerRow]) -> Result<()> {
        use crate::schema::ledger_rows::dsl::*;

        let db_rows: Vec<LedgerRowDb> = rows.iter().map(|r| LedgerRowDb::from(r.clone())).collect();
        let mut conn = get_connection(&self.pool)?;
        debug!("Replacing ledger with {} rows", db_rows.len());
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(ledger_rows).execute(conn)?;
            diesel::insert_into(ledger_rows)
                .values(&db_rows)
                .execute(conn)?;
            Ok(())
        })?;
        Ok(())
    }
}
