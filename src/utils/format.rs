use rust_decimal::Decimal;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Neutral placeholder for undefined metrics. Downstream rendering must never
/// show an undefined value as zero.
pub const UNDEFINED_PLACEHOLDER: &str = "—";

/// Formats an optional percentage, e.g. `Some(-5.5)` -> `"-5.50%"`.
pub fn fmt_pct(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => UNDEFINED_PLACEHOLDER.to_string(),
    }
}

/// Formats a percentage with an explicit sign, one decimal, e.g. `"+9.0%"`.
pub fn fmt_signed_pct(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("{:.1}%", value)
    } else {
        format!("+{:.1}%", value)
    }
}

pub fn fmt_money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.prec$}", v, prec = DISPLAY_DECIMAL_PRECISION as usize),
        None => UNDEFINED_PLACEHOLDER.to_string(),
    }
}

/// Formats a quantity without trailing zeros, for diff deltas ("10", "2.5").
pub fn fmt_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn undefined_values_render_as_placeholder_not_zero() {
        assert_eq!(fmt_pct(None), "—");
        assert_eq!(fmt_money(None), "—");
    }

    #[test]
    fn percentages_are_rounded_to_two_decimals() {
        assert_eq!(fmt_pct(Some(dec!(-5.555))), "-5.56%");
        assert_eq!(fmt_pct(Some(dec!(0))), "0.00%");
    }

    #[test]
    fn signed_percentages_carry_an_explicit_sign() {
        assert_eq!(fmt_signed_pct(dec!(9.04)), "+9.0%");
        assert_eq!(fmt_signed_pct(dec!(-8.0)), "-8.0%");
    }

    #[test]
    fn quantities_drop_trailing_zeros() {
        assert_eq!(fmt_quantity(dec!(10.000)), "10");
        assert_eq!(fmt_quantity(dec!(2.50)), "2.5");
    }
}
