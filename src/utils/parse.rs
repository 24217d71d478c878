use rust_decimal::Decimal;
use std::str::FromStr;

/// Lenient numeric parse for operator-maintained tables: strips spaces
/// (thousands separators) and accepts decimal commas. Anything else is
/// undefined, never an error.
pub fn parse_decimal_lenient(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
