use log::debug;
use rust_decimal::Decimal;

use crate::holdings::holdings_model::{
    Holding, PortfolioValuation, PositionValuation, StopLossRule, StopLossState,
};
use crate::market_data::market_data_model::PriceSnapshot;

/// Joins holdings against a price snapshot and derives per-position market
/// value and stop-loss state.
///
/// CASH always prices at 1.0 regardless of the price table. A ticker absent
/// from the table keeps an undefined price and a zero market value so totals
/// stay computable on partial data.
pub fn value_holdings(holdings: &[Holding], prices: &PriceSnapshot) -> PortfolioValuation {
    let price_map = prices.close_base_map();

    let mut positions = Vec::with_capacity(holdings.len());
    let mut cash_value = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;
    let mut stop_loss_hits = 0usize;

    for holding in holdings {
        let price_base = if holding.is_cash() {
            Some(Decimal::ONE)
        } else {
            price_map.get(holding.ticker.trim()).copied()
        };

        let market_value = match (holding.quantity, price_base) {
            (Some(qty), Some(px)) => qty * px,
            _ => Decimal::ZERO,
        };

        let stop_state = holding
            .stop_loss
            .as_deref()
            .and_then(|raw| raw.parse::<StopLossRule>().ok())
            .map(|rule| rule.evaluate(price_base, holding.cost_basis))
            .unwrap_or_else(StopLossState::not_triggered);

        if holding.is_cash() {
            cash_value += market_value;
        } else if stop_state.triggered {
            stop_loss_hits += 1;
        }
        total_value += market_value;

        positions.push(PositionValuation {
            ticker: holding.ticker.clone(),
            quantity: holding.quantity,
            cost_basis: holding.cost_basis,
            stop_loss: holding.stop_loss.clone(),
            price_base,
            market_value,
            stop_triggered: stop_state.triggered,
            stop_distance_pct: stop_state.distance_pct,
        });
    }

    debug!(
        "Valued {} positions as of {}: total={} cash={} stop hits={}",
        positions.len(),
        prices.as_of,
        total_value,
        cash_value,
        stop_loss_hits
    );

    PortfolioValuation {
        as_of: prices.as_of,
        positions,
        cash_value,
        total_value,
        stop_loss_hits,
    }
}
