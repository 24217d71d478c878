use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Text;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::holdings_model::PortfolioValuation;

/// One position line inside a daily snapshot, as used for diffing and history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPosition {
    pub ticker: String,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub stop_loss: Option<String>,
    pub price_base: Option<Decimal>,
    pub market_value: Decimal,
}

/// Immutable holdings snapshot for one business day, named by that day.
/// Written once per ledger run and only read back by later diff/history logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSnapshot {
    pub snapshot_date: NaiveDate,
    pub positions: Vec<SnapshotPosition>,
    pub created_at: NaiveDateTime,
}

impl HoldingsSnapshot {
    pub fn from_valuation(valuation: &PortfolioValuation) -> Self {
        Self {
            snapshot_date: valuation.as_of,
            positions: valuation
                .positions
                .iter()
                .map(|p| SnapshotPosition {
                    ticker: p.ticker.clone(),
                    quantity: p.quantity,
                    cost_basis: p.cost_basis,
                    stop_loss: p.stop_loss.clone(),
                    price_base: p.price_base,
                    market_value: p.market_value,
                })
                .collect(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

// --- DB Representation ---

#[derive(Debug, Clone, Queryable, QueryableByName, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::holdings_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSnapshotDb {
    #[diesel(sql_type = Text)]
    pub snapshot_date: String,
    // Positions serialized as JSON text
    #[diesel(sql_type = Text)]
    pub positions: String,
    #[diesel(sql_type = Text)]
    pub created_at: String,
}

impl From<HoldingsSnapshotDb> for HoldingsSnapshot {
    fn from(db: HoldingsSnapshotDb) -> Self {
        Self {
            snapshot_date: NaiveDate::parse_from_str(&db.snapshot_date, "%Y-%m-%d")
                .unwrap_or_default(),
            positions: serde_json::from_str(&db.positions).unwrap_or_default(),
            created_at: NaiveDateTime::parse_from_str(&db.created_at, "%Y-%m-%dT%H:%M:%S%.fZ")
                .unwrap_or_else(|e| {
                    log::error!("Failed to parse snapshot created_at '{}': {}", db.created_at, e);
                    Utc::now().naive_utc()
                }),
        }
    }
}

impl From<HoldingsSnapshot> for HoldingsSnapshotDb {
    fn from(domain: HoldingsSnapshot) -> Self {
        Self {
            snapshot_date: domain.snapshot_date.format("%Y-%m-%d").to_string(),
            positions: serde_json::to_string(&domain.positions)
                .unwrap_or_else(|_| "[]".to_string()),
            created_at: domain
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.fZ")
                .to_string(),
        }
    }
}
