use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::ledger::ledger_model::{LedgerRow, NewLedgerEntry};
use crate::ledger::ledger_repository::LedgerRepositoryTrait;

/// Owns the upsert-and-recompute contract: a write for a date replaces that
/// row or appends a new one, then every derived column is recomputed over
/// the whole ledger. O(n) per write, which is fine at one write per
/// business day, and it keeps backfills and corrections self-healing.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Upserts one entry and returns the recomputed ledger, oldest first.
    pub fn upsert(&self, entry: NewLedgerEntry) -> Result<Vec<LedgerRow>> {
        let mut rows = self.repository.get_all_rows()?;

        match rows.iter_mut().find(|r| r.date == entry.date) {
            Some(existing) => {
                existing.portfolio_name = entry.portfolio_name;
                existing.cash_value = entry.cash_value;
                existing.total_value = entry.total_value;
                existing.benchmark_value = entry.benchmark_value;
                existing.notes = entry.notes;
            }
            None => rows.push(LedgerRow {
                date: entry.date,
                day_index: 0,
                day_tag: String::new(),
                portfolio_name: entry.portfolio_name,
                cash_value: entry.cash_value,
                total_value: entry.total_value,
                benchmark_value: entry.benchmark_value,
                return_total_pct: None,
                return_vs_benchmark_pct: None,
                notes: entry.notes,
            }),
        }

        rows.sort_by_key(|r| r.date);
        recompute_derived(&mut rows);
        self.repository.replace_rows(&rows)?;
        debug!("Ledger upsert complete, {} rows", rows.len());
        Ok(rows)
    }

    pub fn get_ledger(&self) -> Result<Vec<LedgerRow>> {
        self.repository.get_all_rows()
    }

    /// Total return from the first recorded day to the latest row, in
    /// percent. Undefined for an empty ledger or a zero starting value.
    pub fn return_since_inception(&self) -> Result<Option<Decimal>> {
        let rows = self.repository.get_all_rows()?;
        Ok(match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => pct_change(last.total_value, first.total_value),
            _ => None,
        })
    }
}

fn pct_change(value: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    Some(((value / base - Decimal::ONE) * dec!(100)).round_dp(DECIMAL_PRECISION))
}

/// Recomputes `day_index`, `day_tag` and both return columns for a
/// date-sorted ledger. The benchmark baseline is the first row where a
/// benchmark value exists, which may be later than day 0.
fn recompute_derived(rows: &mut [LedgerRow]) {
    let (base_date, base_total) = match rows.first() {
        Some(first) => (first.date, first.total_value),
        None => return,
    };
    let base_benchmark = rows.iter().find_map(|r| r.benchmark_value);

    for row in rows.iter_mut() {
        row.day_index = (row.date - base_date).num_days() as i32;
        row.day_tag = format!("Day {} - {}", row.day_index, row.date.format("%Y-%m-%d"));
        row.return_total_pct = pct_change(row.total_value, base_total);
        row.return_vs_benchmark_pct = match (row.benchmark_value, base_benchmark) {
            (Some(bm), Some(base_bm)) => {
                match (row.return_total_pct, pct_change(bm, base_bm)) {
                    (Some(total_pct), Some(bm_pct)) => {
                        Some((total_pct - bm_pct).round_dp(DECIMAL_PRECISION))
                    }
                    _ => None,
                }
            }
            _ => None,
        };
    }
}
