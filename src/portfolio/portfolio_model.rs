use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::holdings_model::PortfolioValuation;
use crate::ledger::ledger_model::LedgerRow;
use crate::orders::orders_model::OrderSuggestion;
use crate::performance::performance_model::WeeklyMetrics;
use crate::snapshot::diff_service::SnapshotDiff;
use crate::watchlist::movers_service::Mover;

/// Everything one end-of-day run produced, for report rendering downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EodReport {
    /// Date the run was valued at; older than the requested date when the
    /// price provider had to look back.
    pub as_of: NaiveDate,
    pub valuation: PortfolioValuation,
    pub diff: SnapshotDiff,
    pub movers: Vec<Mover>,
    pub winners: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub risk_flags: Vec<String>,
    pub orders: Vec<OrderSuggestion>,
    pub ledger: Vec<LedgerRow>,
    pub drawdown_since_inception: Option<Decimal>,
    /// Data-quality notes, also folded into the ledger row's notes.
    pub degraded: Vec<String>,
}

/// The weekly aggregation bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub metrics: WeeklyMetrics,
    pub diff: SnapshotDiff,
    pub winners: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub latest_row: Option<LedgerRow>,
}
