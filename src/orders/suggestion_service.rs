use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use crate::constants::{
    BUY_SIZE_MAX_PCT, BUY_SIZE_MIN_PCT, BUY_SIZE_PCT, BUY_STOP_FACTOR, CASH_HEADROOM_MULTIPLE,
    DRAWDOWN_LIMIT_PCT, MAX_ORDER_SUGGESTIONS,
};
use crate::holdings::holdings_model::PortfolioValuation;
use crate::orders::orders_model::{OrderAction, OrderSize, OrderSuggestion, OrderType};
use crate::watchlist::movers_service::Mover;

/// Runs the fixed-priority rule sequence: unconditional SELLs for triggered
/// stops, momentum BUYs gated by the drawdown and capital guards, a HOLD
/// marker when the drawdown guard blocks new entries. Never returns more
/// than three suggestions; SELLs fill slots first.
pub fn suggest_orders(
    valuation: &PortfolioValuation,
    winners: &[Mover],
    drawdown_since_inception: Option<Decimal>,
) -> Vec<OrderSuggestion> {
    let mut orders = Vec::new();

    for position in &valuation.positions {
        if position.is_cash() || !position.stop_triggered {
            continue;
        }
        let entry = match position.price_base {
            Some(price) => price,
            None => continue,
        };
        orders.push(OrderSuggestion {
            action: OrderAction::Sell,
            ticker: Some(position.ticker.clone()),
            size: Some(OrderSize::FullPosition),
            entry_price: Some(entry),
            stop_loss: position.stop_loss.clone(),
            take_profit: None,
            order_type: Some(OrderType::MarketOnOpen),
            reason: "stop-loss triggered".to_string(),
        });
    }

    // Undefined drawdown (empty ledger) permits buying
    let can_buy = drawdown_since_inception
        .map(|dd| dd >= DRAWDOWN_LIMIT_PCT)
        .unwrap_or(true);

    if can_buy {
        let owned: HashSet<String> = valuation
            .positions
            .iter()
            .filter(|p| !p.is_cash())
            .map(|p| p.ticker.to_uppercase())
            .collect();

        for winner in winners {
            if orders.len() >= MAX_ORDER_SUGGESTIONS {
                break;
            }
            if owned.contains(&winner.ticker.to_uppercase()) {
                continue;
            }
            let entry = match winner.close_base {
                Some(price) if price > Decimal::ZERO => price,
                _ => continue,
            };
            if valuation.total_value <= Decimal::ZERO {
                continue;
            }

            // Fixed size today; the clamp is the tuning boundary
            let size_pct = BUY_SIZE_PCT.clamp(BUY_SIZE_MIN_PCT, BUY_SIZE_MAX_PCT);
            let allocation = valuation.total_value * size_pct / dec!(100);
            if allocation * CASH_HEADROOM_MULTIPLE > valuation.cash_value {
                continue;
            }

            let stop = (entry * BUY_STOP_FACTOR).round_dp(2);
            orders.push(OrderSuggestion {
                action: OrderAction::Buy,
                ticker: Some(winner.ticker.clone()),
                size: Some(OrderSize::Percent(size_pct)),
                entry_price: Some(entry),
                stop_loss: Some(stop.to_string()),
                take_profit: None,
                order_type: Some(OrderType::MarketOnOpen),
                reason: "momentum, not currently held".to_string(),
            });
        }
    } else {
        orders.push(OrderSuggestion {
            action: OrderAction::Hold,
            ticker: None,
            size: None,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            order_type: None,
            reason: "portfolio drawdown exceeds risk limit, no new entries".to_string(),
        });
    }

    orders.truncate(MAX_ORDER_SUGGESTIONS);
    orders
}
