use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::CASH_TICKER;

/// One line of the authoritative target composition. Numeric fields stay
/// optional; an unreadable cell is degraded data, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    /// Raw stop-loss cell, echoed verbatim into SELL suggestions.
    pub stop_loss: Option<String>,
}

impl Holding {
    pub fn is_cash(&self) -> bool {
        self.ticker.eq_ignore_ascii_case(CASH_TICKER)
    }
}

/// A parsed stop-loss rule: percent below cost basis, or an absolute price floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopLossRule {
    PercentBelowCost(Decimal),
    PriceFloor(Decimal),
}

impl StopLossRule {
    /// The price at which the rule triggers, given the cost basis. Undefined
    /// when a percent rule has no cost basis to anchor to.
    pub fn trigger_level(&self, cost_basis: Option<Decimal>) -> Option<Decimal> {
        match *self {
            StopLossRule::PercentBelowCost(pct) => {
                cost_basis.map(|cost| (Decimal::ONE - pct / dec!(100)) * cost)
            }
            StopLossRule::PriceFloor(level) => Some(level),
        }
    }

    /// Evaluates the rule against a current base-currency price. Missing
    /// price or level means the rule must never fire: ambiguous stop data
    /// cannot synthesize a trigger.
    pub fn evaluate(&self, price: Option<Decimal>, cost_basis: Option<Decimal>) -> StopLossState {
        let (price, level) = match (price, self.trigger_level(cost_basis)) {
            (Some(p), Some(l)) => (p, l),
            _ => return StopLossState::not_triggered(),
        };
        let distance_pct = if level.is_zero() {
            None
        } else {
            Some((price / level - Decimal::ONE) * dec!(100))
        };
        StopLossState {
            triggered: price <= level,
            distance_pct,
        }
    }
}

impl FromStr for StopLossRule {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Some(pct) = raw.strip_suffix('%') {
            return Decimal::from_str(pct.trim())
                .map(StopLossRule::PercentBelowCost)
                .map_err(|_| ());
        }
        Decimal::from_str(raw)
            .map(StopLossRule::PriceFloor)
            .map_err(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossState {
    pub triggered: bool,
    /// Percent distance between current price and the trigger level; negative
    /// once the level is breached. Undefined for unparseable/ambiguous rules.
    pub distance_pct: Option<Decimal>,
}

impl StopLossState {
    pub fn not_triggered() -> Self {
        Self {
            triggered: false,
            distance_pct: None,
        }
    }
}

/// A holding joined against a price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    pub ticker: String,
    pub quantity: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub stop_loss: Option<String>,
    /// Base-currency price; undefined when absent from the price table.
    pub price_base: Option<Decimal>,
    /// Zero-filled when the price is undefined so totals stay computable.
    pub market_value: Decimal,
    pub stop_triggered: bool,
    pub stop_distance_pct: Option<Decimal>,
}

impl PositionValuation {
    pub fn is_cash(&self) -> bool {
        self.ticker.eq_ignore_ascii_case(CASH_TICKER)
    }
}

/// Full valuation of the portfolio on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub as_of: chrono::NaiveDate,
    pub positions: Vec<PositionValuation>,
    pub cash_value: Decimal,
    pub total_value: Decimal,
    pub stop_loss_hits: usize,
}
