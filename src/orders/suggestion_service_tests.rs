use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::holdings::holdings_model::{PortfolioValuation, PositionValuation};
use crate::orders::orders_model::{OrderAction, OrderSize, OrderType};
use crate::orders::suggestion_service::suggest_orders;
use crate::watchlist::movers_service::Mover;

fn position(ticker: &str, price: Option<Decimal>, triggered: bool) -> PositionValuation {
    PositionValuation {
        ticker: ticker.to_string(),
        quantity: Some(dec!(10)),
        cost_basis: Some(dec!(100)),
        stop_loss: Some("10%".to_string()),
        price_base: price,
        market_value: price.map(|p| p * dec!(10)).unwrap_or_default(),
        stop_triggered: triggered,
        stop_distance_pct: None,
    }
}

fn valuation(
    positions: Vec<PositionValuation>,
    cash_value: Decimal,
    total_value: Decimal,
) -> PortfolioValuation {
    let stop_loss_hits = positions.iter().filter(|p| p.stop_triggered).count();
    PortfolioValuation {
        as_of: NaiveDate::from_ymd_opt(2025, 8, 28).unwrap(),
        positions,
        cash_value,
        total_value,
        stop_loss_hits,
    }
}

fn winner(ticker: &str, close_base: Option<Decimal>) -> Mover {
    Mover {
        ticker: ticker.to_string(),
        move_pct: Some(dec!(9)),
        close_base,
        in_portfolio: false,
    }
}

#[test]
fn triggered_stops_become_full_position_sells() {
    let val = valuation(
        vec![position("AAA", Some(dec!(85)), true), position("BBB", Some(dec!(200)), false)],
        dec!(1000),
        dec!(3850),
    );
    let orders = suggest_orders(&val, &[], None);

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].action, OrderAction::Sell);
    assert_eq!(orders[0].ticker.as_deref(), Some("AAA"));
    assert_eq!(orders[0].size, Some(OrderSize::FullPosition));
    assert_eq!(orders[0].stop_loss.as_deref(), Some("10%"));
    assert_eq!(orders[0].order_type, Some(OrderType::MarketOnOpen));
}

#[test]
fn triggered_stop_without_a_price_is_not_sellable() {
    let val = valuation(vec![position("AAA", None, true)], dec!(1000), dec!(1000));
    assert!(suggest_orders(&val, &[], None).is_empty());
}

#[test]
fn suggestion_count_never_exceeds_three() {
    let val = valuation(
        vec![
            position("AAA", Some(dec!(80)), true),
            position("BBB", Some(dec!(70)), true),
        ],
        dec!(100000),
        dec!(150000),
    );
    let winners = vec![
        winner("NEW1", Some(dec!(10))),
        winner("NEW2", Some(dec!(10))),
        winner("NEW3", Some(dec!(10))),
    ];
    let orders = suggest_orders(&val, &winners, Some(dec!(-5)));

    assert_eq!(orders.len(), 3);
    // SELLs fill slots first, so only one BUY fits
    assert_eq!(orders[0].action, OrderAction::Sell);
    assert_eq!(orders[1].action, OrderAction::Sell);
    assert_eq!(orders[2].action, OrderAction::Buy);
}

#[test]
fn deep_drawdown_blocks_buys_and_emits_hold() {
    let val = valuation(
        vec![position("AAA", Some(dec!(80)), true)],
        dec!(100000),
        dec!(150000),
    );
    let winners = vec![winner("NEW1", Some(dec!(10)))];
    let orders = suggest_orders(&val, &winners, Some(dec!(-20)));

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].action, OrderAction::Sell);
    assert_eq!(orders[1].action, OrderAction::Hold);
    assert!(orders[1].reason.contains("drawdown"));
}

#[test]
fn undefined_drawdown_permits_buying() {
    let val = valuation(vec![], dec!(100000), dec!(100000));
    let orders = suggest_orders(&val, &[winner("NEW1", Some(dec!(10)))], None);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].action, OrderAction::Buy);
}

#[test]
fn capital_guard_requires_double_headroom() {
    // 5% of 100k = 5k allocation, guard needs cash >= 10k
    let val = valuation(vec![], dec!(9999), dec!(100000));
    assert!(suggest_orders(&val, &[winner("NEW1", Some(dec!(10)))], None).is_empty());

    let val = valuation(vec![], dec!(10000), dec!(100000));
    let orders = suggest_orders(&val, &[winner("NEW1", Some(dec!(10)))], None);
    assert_eq!(orders.len(), 1);
}

#[test]
fn already_held_winners_are_skipped() {
    let val = valuation(
        vec![position("aaa", Some(dec!(100)), false)],
        dec!(50000),
        dec!(100000),
    );
    let orders = suggest_orders(&val, &[winner("AAA", Some(dec!(100)))], None);
    assert!(orders.is_empty());
}

#[test]
fn undefined_or_non_positive_prices_are_skipped() {
    let val = valuation(vec![], dec!(50000), dec!(100000));
    let winners = vec![
        winner("NOPRICE", None),
        winner("ZERO", Some(dec!(0))),
        winner("OK", Some(dec!(25))),
    ];
    let orders = suggest_orders(&val, &winners, None);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].ticker.as_deref(), Some("OK"));
}

#[test]
fn buy_stop_sits_eight_percent_below_entry() {
    let val = valuation(vec![], dec!(50000), dec!(100000));
    let orders = suggest_orders(&val, &[winner("NEW1", Some(dec!(123.456)))], None);
    assert_eq!(orders[0].stop_loss.as_deref(), Some("113.58"));
    assert_eq!(orders[0].size, Some(OrderSize::Percent(dec!(5.0))));
}

#[test]
fn suggestion_renders_as_a_single_order_line() {
    let val = valuation(vec![position("AAA", Some(dec!(85)), true)], dec!(0), dec!(850));
    let orders = suggest_orders(&val, &[], None);
    assert_eq!(
        orders[0].to_string(),
        "[ACTION=SELL] TICKER=AAA SIZE_%=ALL ENTRY=85.00 SL=10% TP=— ORDER_TYPE=MOO REASON=stop-loss triggered"
    );
}
