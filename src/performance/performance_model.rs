use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weekly metrics bundle computed over a windowed view of the ledger. Every
/// metric is individually optional: thin data degrades field by field
/// instead of failing the aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetrics {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub period_return_pct: Option<Decimal>,
    pub benchmark_return_pct: Option<Decimal>,
    pub relative_return_pct: Option<Decimal>,
    pub max_drawdown_pct: Option<Decimal>,
    pub sharpe: Option<Decimal>,
    pub sortino: Option<Decimal>,
}
