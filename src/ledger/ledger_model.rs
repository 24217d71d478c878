use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One fully derived ledger row. `day_index`, `day_tag` and both return
/// columns are recomputed over the whole ledger on every upsert; callers
/// never set them directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub day_index: i32,
    pub day_tag: String,
    pub portfolio_name: String,
    pub cash_value: Decimal,
    pub total_value: Decimal,
    pub benchmark_value: Option<Decimal>,
    pub return_total_pct: Option<Decimal>,
    pub return_vs_benchmark_pct: Option<Decimal>,
    pub notes: String,
}

/// The caller-supplied part of an upsert; everything derived is filled in by
/// the recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub date: NaiveDate,
    pub portfolio_name: String,
    pub cash_value: Decimal,
    pub total_value: Decimal,
    pub benchmark_value: Option<Decimal>,
    pub notes: String,
}

// --- DB Representation ---

#[derive(Debug, Clone, Queryable, QueryableByName, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::ledger_rows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LedgerRowDb {
    pub date: String,
    pub day_index: i32,
    pub day_tag: String,
    pub portfolio_name: String,
    pub cash_value: String,
    pub total_value: String,
    pub benchmark_value: Option<String>,
    pub return_total_pct: Option<String>,
    pub return_vs_benchmark_pct: Option<String>,
    pub notes: String,
}

impl From<LedgerRowDb> for LedgerRow {
    fn from(db: LedgerRowDb) -> Self {
        Self {
            date: NaiveDate::parse_from_str(&db.date, "%Y-%m-%d").unwrap_or_default(),
            day_index: db.day_index,
            day_tag: db.day_tag,
            portfolio_name: db.portfolio_name,
            cash_value: Decimal::from_str(&db.cash_value).unwrap_or_default(),
            total_value: Decimal::from_str(&db.total_value).unwrap_or_default(),
            benchmark_value: db
                .benchmark_value
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            return_total_pct: db
                .return_total_pct
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            return_vs_benchmark_pct: db
                .return_vs_benchmark_pct
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            notes: db.notes,
        }
    }
}

impl From<LedgerRow> for LedgerRowDb {
    fn from(domain: LedgerRow) -> Self {
        Self {
            date: domain.date.format("%Y-%m-%d").to_string(),
            day_index: domain.day_index,
            day_tag: domain.day_tag,
            portfolio_name: domain.portfolio_name,
            cash_value: domain.cash_value.to_string(),
            total_value: domain.total_value.to_string(),
            benchmark_value: domain.benchmark_value.map(|d| d.to_string()),
            return_total_pct: domain.return_total_pct.map(|d| d.to_string()),
            return_vs_benchmark_pct: domain.return_vs_benchmark_pct.map(|d| d.to_string()),
            notes: domain.notes,
        }
    }
}
