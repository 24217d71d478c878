use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::QUANTITY_EPSILON;
use crate::snapshot::snapshot_model::HoldingsSnapshot;
use crate::utils::format::fmt_quantity;

/// Classified deltas between two holdings snapshots, as human-readable lines
/// ordered lexicographically by ticker. CASH never appears in any category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDiff {
    pub new_positions: Vec<String>,
    pub closed_positions: Vec<String>,
    pub quantity_changes: Vec<String>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.new_positions.is_empty()
            && self.closed_positions.is_empty()
            && self.quantity_changes.is_empty()
    }
}

fn quantity_map(snapshot: &HoldingsSnapshot) -> BTreeMap<String, Decimal> {
    snapshot
        .positions
        .iter()
        .filter(|p| !p.ticker.eq_ignore_ascii_case(crate::constants::CASH_TICKER))
        .map(|p| {
            (
                p.ticker.trim().to_string(),
                p.quantity.unwrap_or(Decimal::ZERO),
            )
        })
        .collect()
}

/// Compares a previous and a current snapshot. The BTreeMap iteration order
/// makes every output list deterministic.
pub fn diff_snapshots(previous: &HoldingsSnapshot, current: &HoldingsSnapshot) -> SnapshotDiff {
    let prev = quantity_map(previous);
    let curr = quantity_map(current);

    let mut diff = SnapshotDiff::default();

    for (ticker, qty) in &curr {
        match prev.get(ticker) {
            None => diff
                .new_positions
                .push(format!("{} ({})", ticker, fmt_quantity(*qty))),
            Some(prev_qty) => {
                if (*qty - *prev_qty).abs() > QUANTITY_EPSILON {
                    diff.quantity_changes.push(format!(
                        "{} ({} -> {})",
                        ticker,
                        fmt_quantity(*prev_qty),
                        fmt_quantity(*qty)
                    ));
                }
            }
        }
    }

    for (ticker, prev_qty) in &prev {
        if !curr.contains_key(ticker) {
            diff.closed_positions
                .push(format!("{} (0 from {})", ticker, fmt_quantity(*prev_qty)));
        }
    }

    diff
}
