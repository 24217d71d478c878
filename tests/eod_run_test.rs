use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use eodfolio_core::constants::DEFAULT_BASE_CURRENCY;
use eodfolio_core::holdings::csv_source::CsvHoldingsSource;
use eodfolio_core::ledger::{LedgerRepository, LedgerService};
use eodfolio_core::market_data::csv_provider::CsvPriceProvider;
use eodfolio_core::orders::{OrderAction, OrderSize};
use eodfolio_core::portfolio::PortfolioService;
use eodfolio_core::snapshot::{SnapshotRepository, SnapshotRepositoryTrait};
use eodfolio_core::watchlist::{CsvWatchlistSource, WatchlistRepository, WatchlistRepositoryTrait};

mod common;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn write_prices(dir: &Path, stamp: &str, body: &str) {
    fs::write(
        dir.join(format!("prices_raw_{stamp}.csv")),
        format!("ticker,close,currency,close_sek\n{body}"),
    )
    .unwrap();
}

fn write_holdings(path: &Path, body: &str) {
    fs::write(path, format!("ticker,quantity,cost_basis,stop_loss\n{body}")).unwrap();
}

fn service(dir: &Path, pool: Arc<eodfolio_core::db::DbPool>) -> PortfolioService {
    PortfolioService::new(
        Arc::new(CsvPriceProvider::new(dir, DEFAULT_BASE_CURRENCY)),
        Arc::new(CsvHoldingsSource::new(dir.join("holdings.csv"))),
        Arc::new(CsvWatchlistSource::new(dir.join("watchlist.csv"))),
        Arc::new(SnapshotRepository::new(pool.clone())),
        Arc::new(WatchlistRepository::new(pool.clone())),
        LedgerService::new(Arc::new(LedgerRepository::new(pool))),
        "Model Portfolio",
        "ACWI",
    )
}

#[test]
fn two_day_run_produces_ledger_diff_movers_and_orders() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let pool = common::setup_pool(dir);
    let portfolio = service(dir, pool.clone());

    fs::write(dir.join("watchlist.csv"), "ticker\nAAA\nBBB\nNEW1\n").unwrap();
    write_holdings(
        &dir.join("holdings.csv"),
        "CASH,50000,,\nAAA,100,90,10%\nBBB,200,60,40\n",
    );
    write_prices(
        dir,
        "20250825",
        "AAA,100,SEK,100\nBBB,50,SEK,50\nNEW1,10,SEK,10\nACWI,200,SEK,200\n",
    );

    // Day one: nothing to diff against, no mover history, no orders
    let day1 = portfolio.run_eod(d(2025, 8, 25)).unwrap();
    assert_eq!(day1.as_of, d(2025, 8, 25));
    assert_eq!(day1.valuation.total_value, dec!(70000));
    assert_eq!(day1.valuation.cash_value, dec!(50000));
    assert!(day1.diff.is_empty());
    assert!(day1.winners.is_empty());
    assert!(day1.orders.is_empty());
    assert_eq!(day1.ledger.len(), 1);
    assert_eq!(day1.ledger[0].day_tag, "Day 0 - 2025-08-25");
    assert_eq!(day1.ledger[0].return_total_pct, Some(dec!(0)));
    assert_eq!(day1.ledger[0].benchmark_value, Some(dec!(200)));
    assert_eq!(day1.ledger[0].notes, "Stop-loss triggers: 0");

    // Day two: AAA crashes through its stop, BBB was trimmed, NEW1 rallies
    write_holdings(
        &dir.join("holdings.csv"),
        "CASH,50000,,\nAAA,100,90,10%\nBBB,150,60,40\n",
    );
    write_prices(
        dir,
        "20250826",
        "AAA,70,SEK,70\nBBB,55,SEK,55\nNEW1,11,SEK,11\nACWI,202,SEK,202\n",
    );

    let day2 = portfolio.run_eod(d(2025, 8, 26)).unwrap();
    assert_eq!(day2.valuation.total_value, dec!(65250));
    assert_eq!(day2.valuation.stop_loss_hits, 1);

    assert_eq!(day2.diff.quantity_changes, vec!["BBB (200 -> 150)"]);
    assert!(day2.diff.new_positions.is_empty());

    // Winners: BBB and NEW1 both +10%, input order breaks the tie
    let winner_tickers: Vec<&str> = day2.winners.iter().map(|m| m.ticker.as_str()).collect();
    assert_eq!(winner_tickers, vec!["BBB", "NEW1", "AAA"]);
    assert_eq!(day2.winners[0].move_pct, Some(dec!(10)));

    // AAA moved -30% and trades below its stop level
    assert!(day2.risk_flags.iter().any(|f| f == "AAA (-30.0%)"));
    assert!(day2.risk_flags.iter().any(|f| f.starts_with("AAA (near stop:")));

    // SELL the stopped position, BUY the unheld winner
    assert_eq!(day2.orders.len(), 2);
    assert_eq!(day2.orders[0].action, OrderAction::Sell);
    assert_eq!(day2.orders[0].ticker.as_deref(), Some("AAA"));
    assert_eq!(day2.orders[0].size, Some(OrderSize::FullPosition));
    assert_eq!(day2.orders[0].stop_loss.as_deref(), Some("10%"));
    assert_eq!(day2.orders[1].action, OrderAction::Buy);
    assert_eq!(day2.orders[1].ticker.as_deref(), Some("NEW1"));
    assert_eq!(day2.orders[1].stop_loss.as_deref(), Some("10.12"));

    // Ledger derives both return columns
    assert_eq!(day2.ledger.len(), 2);
    assert_eq!(day2.ledger[1].day_index, 1);
    assert_eq!(day2.ledger[1].return_total_pct, Some(dec!(-6.785714)));
    assert_eq!(day2.ledger[1].return_vs_benchmark_pct, Some(dec!(-7.785714)));
    assert_eq!(day2.drawdown_since_inception, Some(dec!(-6.785714)));

    // One snapshot per business day, oldest first
    let snapshots = SnapshotRepository::new(pool);
    assert_eq!(
        snapshots.list_dates().unwrap(),
        vec![d(2025, 8, 25), d(2025, 8, 26)]
    );
}

#[test]
fn rerunning_the_same_day_converges() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let pool = common::setup_pool(dir);
    let portfolio = service(dir, pool.clone());

    fs::write(dir.join("watchlist.csv"), "ticker\nAAA\n").unwrap();
    write_holdings(&dir.join("holdings.csv"), "CASH,10000,,\nAAA,10,100,10%\n");
    write_prices(dir, "20250825", "AAA,100,SEK,100\n");

    let first = portfolio.run_eod(d(2025, 8, 25)).unwrap();
    let second = portfolio.run_eod(d(2025, 8, 25)).unwrap();

    assert_eq!(first.ledger, second.ledger);
    assert_eq!(first.valuation, second.valuation);

    // The watchlist master log did not grow duplicates
    let watchlist_repo = WatchlistRepository::new(pool);
    let entries = watchlist_repo.entries_on(d(2025, 8, 25)).unwrap();
    assert_eq!(entries.len(), 1);
}

#[test]
fn missing_prices_degrade_but_still_write_the_ledger() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let pool = common::setup_pool(dir);
    let portfolio = service(dir, pool);

    fs::write(dir.join("watchlist.csv"), "ticker\nAAA\n").unwrap();
    write_holdings(&dir.join("holdings.csv"), "CASH,25000,,\nAAA,10,100,10%\n");
    // No price file at all within the look-back window

    let report = portfolio.run_eod(d(2025, 8, 25)).unwrap();
    // Cash carries the row; the equity position zero-fills
    assert_eq!(report.valuation.total_value, dec!(25000));
    assert_eq!(report.valuation.cash_value, dec!(25000));
    assert!(!report.degraded.is_empty());
    assert_eq!(report.ledger.len(), 1);
    assert!(report.ledger[0].notes.contains("no price snapshot"));
    assert_eq!(report.ledger[0].benchmark_value, None);
}

#[test]
fn missing_holdings_abort_before_touching_the_ledger() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let pool = common::setup_pool(dir);
    let portfolio = service(dir, pool.clone());

    fs::write(dir.join("watchlist.csv"), "ticker\nAAA\n").unwrap();
    write_prices(dir, "20250825", "AAA,100,SEK,100\n");

    assert!(portfolio.run_eod(d(2025, 8, 25)).is_err());

    let ledger = LedgerService::new(Arc::new(LedgerRepository::new(pool)));
    assert!(ledger.get_ledger().unwrap().is_empty());
}

#[test]
fn weekly_report_aggregates_the_week() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let pool = common::setup_pool(dir);
    let portfolio = service(dir, pool);

    fs::write(dir.join("watchlist.csv"), "ticker\nAAA\nBBB\n").unwrap();
    write_holdings(&dir.join("holdings.csv"), "CASH,20000,,\nAAA,100,90,10%\n");

    write_prices(dir, "20250825", "AAA,100,SEK,100\nBBB,50,SEK,50\n");
    portfolio.run_eod(d(2025, 8, 25)).unwrap();
    write_prices(dir, "20250826", "AAA,102,SEK,102\nBBB,48,SEK,48\n");
    portfolio.run_eod(d(2025, 8, 26)).unwrap();
    write_prices(dir, "20250827", "AAA,104,SEK,104\nBBB,45,SEK,45\n");
    portfolio.run_eod(d(2025, 8, 27)).unwrap();

    let report = portfolio.run_weekly(d(2025, 8, 27)).unwrap();

    assert_eq!(report.metrics.week_start, d(2025, 8, 25));
    assert_eq!(report.metrics.week_end, d(2025, 8, 29));
    // 30000 -> 30400 over the week
    assert_eq!(report.metrics.period_return_pct, Some(dec!(1.333333)));
    assert!(report.metrics.max_drawdown_pct.is_some());

    let winners: Vec<&str> = report.winners.iter().map(|m| m.ticker.as_str()).collect();
    assert_eq!(winners, vec!["AAA", "BBB"]);
    assert_eq!(report.winners[0].move_pct, Some(dec!(4)));
    assert_eq!(report.losers[0].ticker, "BBB");
    assert_eq!(report.losers[0].move_pct, Some(dec!(-10)));

    assert_eq!(report.latest_row.unwrap().date, d(2025, 8, 27));
    // Holdings were steady all week
    assert!(report.diff.is_empty());
}
