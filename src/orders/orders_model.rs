use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::format::UNDEFINED_PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderAction::Buy => write!(f, "BUY"),
            OrderAction::Sell => write!(f, "SELL"),
            OrderAction::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    MarketOnOpen,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::MarketOnOpen => write!(f, "MOO"),
        }
    }
}

/// Position size of a suggestion: liquidate everything, or a percentage of
/// total portfolio value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderSize {
    FullPosition,
    Percent(Decimal),
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSize::FullPosition => write!(f, "ALL"),
            OrderSize::Percent(pct) => write!(f, "{:.1}", pct),
        }
    }
}

/// One actionable suggestion from the rule engine. HOLD rows carry no ticker
/// or pricing; they exist to state why nothing else was suggested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSuggestion {
    pub action: OrderAction,
    pub ticker: Option<String>,
    pub size: Option<OrderSize>,
    pub entry_price: Option<Decimal>,
    pub stop_loss: Option<String>,
    pub take_profit: Option<Decimal>,
    pub order_type: Option<OrderType>,
    pub reason: String,
}

impl fmt::Display for OrderSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = || UNDEFINED_PLACEHOLDER.to_string();
        write!(
            f,
            "[ACTION={}] TICKER={} SIZE_%={} ENTRY={} SL={} TP={} ORDER_TYPE={} REASON={}",
            self.action,
            self.ticker.clone().unwrap_or_else(dash),
            self.size.map(|s| s.to_string()).unwrap_or_else(dash),
            self.entry_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(dash),
            self.stop_loss.clone().unwrap_or_else(dash),
            self.take_profit
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(dash),
            self.order_type.map(|t| t.to_string()).unwrap_or_else(dash),
            self.reason
        )
    }
}
