//! Report computation.
//!
//! Each aggregator is a pure function over rows that already passed the
//! active [`DateRange`]; fetching and timeouts live in [`service`].

pub mod attendance;
pub mod attrition;
pub mod date_range;
pub mod export;
pub mod leave;
pub mod service;

use chrono::{Datelike, NaiveDate};

pub use attendance::AttendanceAnalytics;
pub use attrition::AttritionAnalytics;
pub use date_range::{DateRange, DateRangeQuery};
pub use leave::LeaveAnalytics;

/// `part / whole * 100`, rounded to one decimal. Zero when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

/// Rounds half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sortable calendar-month key.
pub(crate) fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

pub(crate) fn format_month((year, month): (i32, u32)) -> String {
    format!("{:04}-{:02}", year, month)
}
