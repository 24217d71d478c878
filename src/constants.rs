use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reserved ticker for the cash position; always priced at 1.0
pub const CASH_TICKER: &str = "CASH";

/// Default base currency all values are normalized to
pub const DEFAULT_BASE_CURRENCY: &str = "SEK";

/// Decimal precision for stored valuation figures
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Quantity delta below which two positions count as unchanged
pub const QUANTITY_EPSILON: Decimal = dec!(0.000000001);

/// How many days to look back for a price snapshot during the daily run
pub const PRICE_LOOKBACK_DAYS: u32 = 4;

/// Hard cap on order suggestions per run
pub const MAX_ORDER_SUGGESTIONS: usize = 3;

/// Fixed position size for momentum entries, percent of total value
pub const BUY_SIZE_PCT: Decimal = dec!(5.0);

/// Sizing clamp bounds; the fixed size never hits them today but the clamp
/// is a deliberate extension point for tuning
pub const BUY_SIZE_MIN_PCT: Decimal = dec!(2.0);
pub const BUY_SIZE_MAX_PCT: Decimal = dec!(10.0);

/// New entries get a stop at 8% below entry
pub const BUY_STOP_FACTOR: Decimal = dec!(0.92);

/// BUYs require cash headroom of at least this multiple of the allocation
pub const CASH_HEADROOM_MULTIPLE: Decimal = dec!(2.0);

/// No new entries when return since day 0 is worse than this
pub const DRAWDOWN_LIMIT_PCT: Decimal = dec!(-15.0);

/// Daily move magnitude that raises a risk flag, percent
pub const MOVE_FLAG_THRESHOLD_PCT: Decimal = dec!(8.0);

/// Stop-loss distance at or below which a held position is flagged, percent
pub const NEAR_STOP_THRESHOLD_PCT: Decimal = dec!(3.0);

/// Ranked list sizes
pub const DAILY_TOP_MOVERS: usize = 3;
pub const WEEKLY_TOP_MOVERS: usize = 5;
