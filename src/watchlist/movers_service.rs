use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::constants::{MOVE_FLAG_THRESHOLD_PCT, NEAR_STOP_THRESHOLD_PCT};
use crate::holdings::holdings_model::PositionValuation;
use crate::utils::format::fmt_signed_pct;
use crate::watchlist::watchlist_model::WatchlistEntry;

/// A watchlist symbol scored by period-over-period price change. The score
/// stays undefined when no usable prior price exists; such symbols are kept
/// in the flat list but never ranked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub ticker: String,
    pub move_pct: Option<Decimal>,
    pub close_base: Option<Decimal>,
    pub in_portfolio: bool,
}

/// Scores today's watchlist entries against the most recent logged close per
/// ticker. Input order is preserved; ranking happens in the top_* helpers.
pub fn daily_movers(
    entries: &[WatchlistEntry],
    prev_closes: &HashMap<String, Decimal>,
) -> Vec<Mover> {
    entries
        .iter()
        .map(|entry| {
            let move_pct = match (entry.close_base, prev_closes.get(&entry.ticker).copied()) {
                (Some(current), Some(previous)) if !previous.is_zero() => {
                    Some((current / previous - Decimal::ONE) * dec!(100))
                }
                _ => None,
            };
            Mover {
                ticker: entry.ticker.clone(),
                move_pct,
                close_base: entry.close_base,
                in_portfolio: entry.in_portfolio,
            }
        })
        .collect()
}

/// Scores a date-ordered slice of the master log by first-versus-last defined
/// close per ticker. Output is grouped lexicographically by ticker.
pub fn weekly_movers(log_rows: &[WatchlistEntry]) -> Vec<Mover> {
    let mut by_ticker: BTreeMap<String, Vec<&WatchlistEntry>> = BTreeMap::new();
    for row in log_rows {
        by_ticker.entry(row.ticker.clone()).or_default().push(row);
    }

    by_ticker
        .into_iter()
        .map(|(symbol, rows)| {
            let first = rows.iter().find_map(|r| r.close_base);
            let last = rows.iter().rev().find_map(|r| r.close_base);
            let move_pct = match (first, last) {
                (Some(p0), Some(p1)) if !p0.is_zero() => {
                    Some((p1 / p0 - Decimal::ONE) * dec!(100))
                }
                _ => None,
            };
            Mover {
                ticker: symbol,
                move_pct,
                close_base: last,
                in_portfolio: rows.iter().any(|r| r.in_portfolio),
            }
        })
        .collect()
}

/// Highest scored movers first. The sort is stable, so equal scores keep
/// their input order.
pub fn top_winners(movers: &[Mover], n: usize) -> Vec<Mover> {
    let mut ranked: Vec<Mover> = movers.iter().filter(|m| m.move_pct.is_some()).cloned().collect();
    ranked.sort_by(|a, b| b.move_pct.cmp(&a.move_pct));
    ranked.truncate(n);
    ranked
}

pub fn top_losers(movers: &[Mover], n: usize) -> Vec<Mover> {
    let mut ranked: Vec<Mover> = movers.iter().filter(|m| m.move_pct.is_some()).cloned().collect();
    ranked.sort_by(|a, b| a.move_pct.cmp(&b.move_pct));
    ranked.truncate(n);
    ranked
}

/// Flat list of risk flags: large single-period moves plus held positions
/// trading near their stop level. A symbol may appear for both reasons.
pub fn risk_flags(movers: &[Mover], positions: &[PositionValuation]) -> Vec<String> {
    let mut flags = Vec::new();

    for mover in movers {
        if let Some(pct) = mover.move_pct {
            if pct.abs() >= MOVE_FLAG_THRESHOLD_PCT {
                flags.push(format!("{} ({})", mover.ticker, fmt_signed_pct(pct)));
            }
        }
    }

    for position in positions {
        if position.is_cash() {
            continue;
        }
        if let Some(distance) = position.stop_distance_pct {
            if distance <= NEAR_STOP_THRESHOLD_PCT {
                flags.push(format!("{} (near stop: {:.1}%)", position.ticker, distance));
            }
        }
    }

    flags
}
