use chrono::{Datelike, NaiveDate};

const UNIX_EPOCH_DAY: i32 = 719_163;

/// Parse a commissioning date such as `"24.03.2019"` with the given chrono format.
pub fn parse_date(s: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), format).ok()
}

/// Days since 1970-01-01, the Arrow `Date32` representation.
pub fn to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAY
}

pub fn from_date32(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAY)?)
}

/// Sortable calendar-month key of a date.
pub fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// `(2019, 3)` → `"2019-03"`
pub fn format_month((year, month): (i32, u32)) -> String {
    format!("{:04}-{:02}", year, month)
}
