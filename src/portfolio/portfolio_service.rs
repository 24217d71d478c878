use chrono::NaiveDate;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::constants::{DAILY_TOP_MOVERS, WEEKLY_TOP_MOVERS};
use crate::errors::Result;
use crate::holdings::holdings_traits::HoldingsSourceTrait;
use crate::holdings::valuation_service::value_holdings;
use crate::ledger::ledger_model::NewLedgerEntry;
use crate::ledger::ledger_service::LedgerService;
use crate::market_data::market_data_model::PriceSnapshot;
use crate::market_data::market_data_traits::PriceProviderTrait;
use crate::orders::suggestion_service::suggest_orders;
use crate::performance::performance_service::weekly_metrics;
use crate::portfolio::portfolio_model::{EodReport, WeeklyReport};
use crate::snapshot::diff_service::{diff_snapshots, SnapshotDiff};
use crate::snapshot::snapshot_model::HoldingsSnapshot;
use crate::snapshot::snapshot_repository::SnapshotRepositoryTrait;
use crate::utils::time_utils::week_bounds;
use crate::watchlist::movers_service::{daily_movers, risk_flags, top_losers, top_winners, weekly_movers};
use crate::watchlist::watchlist_model::WatchlistEntry;
use crate::watchlist::watchlist_repository::WatchlistRepositoryTrait;
use crate::watchlist::watchlist_traits::WatchlistSourceTrait;

/// Master-log rows to borrow when a week has no watchlist history at all.
const WEEKLY_LOG_FALLBACK_ROWS: i64 = 7;

/// Orchestrates one batch run end to end: valuation, snapshot diff, movers
/// and flags, order suggestions and the ledger upsert. Collaborators sit
/// behind traits so the run can be driven from CSV fixtures in tests.
pub struct PortfolioService {
    price_provider: Arc<dyn PriceProviderTrait>,
    holdings_source: Arc<dyn HoldingsSourceTrait>,
    watchlist_source: Arc<dyn WatchlistSourceTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    watchlist_repository: Arc<dyn WatchlistRepositoryTrait>,
    ledger_service: LedgerService,
    portfolio_name: String,
    benchmark_ticker: String,
}

impl PortfolioService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        price_provider: Arc<dyn PriceProviderTrait>,
        holdings_source: Arc<dyn HoldingsSourceTrait>,
        watchlist_source: Arc<dyn WatchlistSourceTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        watchlist_repository: Arc<dyn WatchlistRepositoryTrait>,
        ledger_service: LedgerService,
        portfolio_name: impl Into<String>,
        benchmark_ticker: impl Into<String>,
    ) -> Self {
        Self {
            price_provider,
            holdings_source,
            watchlist_source,
            snapshot_repository,
            watchlist_repository,
            ledger_service,
            portfolio_name: portfolio_name.into(),
            benchmark_ticker: benchmark_ticker.into(),
        }
    }

    /// Runs the end-of-day pipeline for `date`. Missing holdings abort the
    /// run before anything is written; missing prices only degrade it.
    pub fn run_eod(&self, date: NaiveDate) -> Result<EodReport> {
        let mut degraded = Vec::new();

        let prices = match self.price_provider.get_price_snapshot(date)? {
            Some(snapshot) => snapshot,
            None => {
                warn!("No price snapshot within look-back window of {}", date);
                degraded.push("no price snapshot within look-back window".to_string());
                PriceSnapshot::empty(date)
            }
        };
        let as_of = prices.as_of;

        // Fatal on absence: the ledger must not be written from partial holdings
        let holdings = self.holdings_source.get_holdings()?;
        let valuation = value_holdings(&holdings, &prices);
        let benchmark_value = prices.close_base(&self.benchmark_ticker);

        // Snapshot and diff against the previous business day
        let snapshot = HoldingsSnapshot::from_valuation(&valuation);
        let previous = self.snapshot_repository.get_previous_snapshot(as_of)?;
        self.snapshot_repository.save_snapshot(&snapshot)?;
        let diff = previous
            .map(|prev| diff_snapshots(&prev, &snapshot))
            .unwrap_or_default();

        // Watchlist: extend the master log, then score against it
        let held: HashSet<String> = holdings
            .iter()
            .filter(|h| !h.is_cash())
            .map(|h| h.ticker.to_uppercase())
            .collect();
        let tickers = self.watchlist_source.get_tickers()?;
        let entries = WatchlistEntry::join_prices(&tickers, &prices, &held);
        if entries.is_empty() {
            degraded.push("watchlist snapshot is empty".to_string());
        }
        self.watchlist_repository.upsert_entries(&entries)?;

        let mut prev_closes = HashMap::new();
        for entry in &entries {
            if let Some(close) = self
                .watchlist_repository
                .previous_close_base(&entry.ticker, as_of)?
            {
                prev_closes.insert(entry.ticker.clone(), close);
            }
        }
        let movers = daily_movers(&entries, &prev_closes);
        let winners = top_winners(&movers, DAILY_TOP_MOVERS);
        let losers = top_losers(&movers, DAILY_TOP_MOVERS);
        let flags = risk_flags(&movers, &valuation.positions);

        let mut notes = format!("Stop-loss triggers: {}", valuation.stop_loss_hits);
        if !degraded.is_empty() {
            notes.push_str(" | ");
            notes.push_str(&degraded.join("; "));
        }

        let ledger = self.ledger_service.upsert(NewLedgerEntry {
            date: as_of,
            portfolio_name: self.portfolio_name.clone(),
            cash_value: valuation.cash_value,
            total_value: valuation.total_value,
            benchmark_value,
            notes,
        })?;

        let drawdown = self.ledger_service.return_since_inception()?;
        let orders = suggest_orders(&valuation, &winners, drawdown);

        info!(
            "EOD run complete for {}: total={} cash={} orders={}",
            as_of,
            valuation.total_value,
            valuation.cash_value,
            orders.len()
        );

        Ok(EodReport {
            as_of,
            valuation,
            diff,
            movers,
            winners,
            losers,
            risk_flags: flags,
            orders,
            ledger,
            drawdown_since_inception: drawdown,
            degraded,
        })
    }

    /// Aggregates the ISO week containing `target` out of stored state; no
    /// external sources are consulted and nothing is written.
    pub fn run_weekly(&self, target: NaiveDate) -> Result<WeeklyReport> {
        let (monday, friday) = week_bounds(target);

        let ledger = self.ledger_service.get_ledger()?;
        let metrics = weekly_metrics(&ledger, target);

        let start_snapshot = self.snapshot_repository.get_snapshot_on_or_before(monday)?;
        let end_snapshot = self.snapshot_repository.get_snapshot_on_or_before(friday)?;
        let diff = match (start_snapshot, end_snapshot) {
            (Some(start), Some(end)) => diff_snapshots(&start, &end),
            _ => SnapshotDiff::default(),
        };

        let mut log_rows = self.watchlist_repository.entries_between(monday, friday)?;
        if log_rows.is_empty() {
            log_rows = self
                .watchlist_repository
                .recent_entries_on_or_before(friday, WEEKLY_LOG_FALLBACK_ROWS)?;
        }
        let movers = weekly_movers(&log_rows);
        let winners = top_winners(&movers, WEEKLY_TOP_MOVERS);
        let losers = top_losers(&movers, WEEKLY_TOP_MOVERS);

        let latest_row = ledger
            .iter()
            .filter(|r| r.date >= monday && r.date <= friday)
            .last()
            .or_else(|| ledger.last())
            .cloned();

        Ok(WeeklyReport {
            metrics,
            diff,
            winners,
            losers,
            latest_row,
        })
    }
}
