use chrono::{Datelike, Duration, NaiveDate};

/// Monday and Friday of the ISO week containing `target`.
pub fn week_bounds(target: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = target.weekday().number_from_monday() as i64;
    let monday = target - Duration::days(weekday - 1);
    let friday = monday + Duration::days(4);
    (monday, friday)
}

/// Compact YYYYMMDD stamp used in price file names.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_bounds_span_monday_to_friday() {
        // 2025-08-27 is a Wednesday
        let (monday, friday) = week_bounds(d(2025, 8, 27));
        assert_eq!(monday, d(2025, 8, 25));
        assert_eq!(friday, d(2025, 8, 29));
    }

    #[test]
    fn week_bounds_on_weekend_point_back_to_the_same_iso_week() {
        let (monday, friday) = week_bounds(d(2025, 8, 31)); // Sunday
        assert_eq!(monday, d(2025, 8, 25));
        assert_eq!(friday, d(2025, 8, 29));
    }
}
