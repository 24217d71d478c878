use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::ledger::ledger_model::LedgerRow;
use crate::performance::performance_model::WeeklyMetrics;
use crate::utils::time_utils::week_bounds;

/// Minimum day-over-day samples before Sharpe/Sortino are meaningful.
const MIN_RATIO_SAMPLES: usize = 3;

/// Guard against zero volatility in ratio denominators.
const VOLATILITY_EPSILON: Decimal = dec!(0.000000000001);

const TRADING_DAYS_PER_YEAR: Decimal = dec!(252);

/// Computes the weekly metrics bundle for the ISO week containing `target`.
/// An empty Monday-Friday slice falls back to the most recent five rows at
/// or before that Friday; Sharpe, Sortino and drawdown fall back to the
/// whole ledger when the slice is too thin to be meaningful.
pub fn weekly_metrics(ledger: &[LedgerRow], target: NaiveDate) -> WeeklyMetrics {
    let (monday, friday) = week_bounds(target);

    let mut week: Vec<&LedgerRow> = ledger
        .iter()
        .filter(|r| r.date >= monday && r.date <= friday)
        .collect();
    if week.is_empty() {
        week = ledger.iter().filter(|r| r.date <= friday).collect();
        let overflow = week.len().saturating_sub(5);
        week.drain(..overflow);
    }

    let period_return_pct = match (week.first(), week.last()) {
        (Some(first), Some(last)) => pct_change(last.total_value, first.total_value),
        _ => None,
    };
    let benchmark_return_pct = match (week.first(), week.last()) {
        (Some(first), Some(last)) => match (first.benchmark_value, last.benchmark_value) {
            (Some(base), Some(latest)) => pct_change(latest, base),
            _ => None,
        },
        _ => None,
    };
    let relative_return_pct = match (period_return_pct, benchmark_return_pct) {
        (Some(port), Some(bench)) => Some(port - bench),
        _ => None,
    };

    let reference: Vec<Decimal> = if week.len() >= MIN_RATIO_SAMPLES {
        week.iter().map(|r| r.total_value).collect()
    } else {
        ledger.iter().map(|r| r.total_value).collect()
    };

    let (sharpe, sortino) = sharpe_sortino(&reference);

    WeeklyMetrics {
        week_start: monday,
        week_end: friday,
        period_return_pct,
        benchmark_return_pct,
        relative_return_pct,
        max_drawdown_pct: max_drawdown(&reference),
        sharpe,
        sortino,
    }
}

fn pct_change(value: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    Some(((value / base - Decimal::ONE) * dec!(100)).round_dp(DECIMAL_PRECISION))
}

/// Single-pass maximum drawdown in percent. The peak only ever rises, so a
/// recovery never resets the reference high.
pub fn max_drawdown(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut peak = Decimal::MIN;
    let mut max_dd = Decimal::ZERO;
    for &value in values {
        peak = peak.max(value);
        if peak > Decimal::ZERO {
            let dd = (value / peak - Decimal::ONE) * dec!(100);
            max_dd = max_dd.min(dd);
        }
    }
    Some(max_dd.round_dp(DECIMAL_PRECISION))
}

/// Annualized Sharpe and Sortino over day-over-day log returns of a value
/// series, at a zero risk-free rate. Undefined below three usable values;
/// Sortino additionally needs at least two negative returns for a sample
/// downside deviation to exist.
pub fn sharpe_sortino(values: &[Decimal]) -> (Option<Decimal>, Option<Decimal>) {
    let usable: Vec<Decimal> = values
        .iter()
        .copied()
        .filter(|v| *v > Decimal::ZERO)
        .collect();
    if usable.len() < MIN_RATIO_SAMPLES {
        return (None, None);
    }

    let returns: Vec<Decimal> = usable.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let mean = mean(&returns);
    let annualizer = TRADING_DAYS_PER_YEAR.sqrt().unwrap_or_default();

    let sharpe = sample_stdev(&returns)
        .map(|sd| ((mean / (sd + VOLATILITY_EPSILON)) * annualizer).round_dp(DECIMAL_PRECISION));

    let downside: Vec<Decimal> = returns
        .iter()
        .copied()
        .filter(|r| *r < Decimal::ZERO)
        .collect();
    let sortino = sample_stdev(&downside)
        .map(|sd| ((mean / (sd + VOLATILITY_EPSILON)) * annualizer).round_dp(DECIMAL_PRECISION));

    (sharpe, sortino)
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

/// Sample standard deviation (ddof = 1). Undefined below two samples.
fn sample_stdev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let variance = values
        .iter()
        .map(|v| (*v - m) * (*v - m))
        .sum::<Decimal>()
        / Decimal::from((values.len() - 1) as u64);
    variance.sqrt()
}
