use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AnalyticsError, AnalyticsResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw `start_date` / `end_date` query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[param(example = "2024-03-31")]
    pub end_date: Option<String>,
}

/// Inclusive date filter. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AnalyticsResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(AnalyticsError::InvalidRange(format!(
                    "end_date {} is before start_date {}",
                    e, s
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn parse(start: Option<&str>, end: Option<&str>) -> AnalyticsResult<Self> {
        let start = parse_bound("start_date", start)?;
        let end = parse_bound("end_date", end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Keeps the items whose key date falls in range, preserving order.
    pub fn apply<'a, T, F>(&self, rows: &'a [T], key: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> NaiveDate,
    {
        rows.iter().filter(|r| self.contains(key(r))).collect()
    }

    /// Suffix appended to export file names, e.g. `_2024-01-01_to_2024-03-31`.
    pub fn filename_suffix(&self) -> String {
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!("_{}_to_{}", s.format(DATE_FORMAT), e.format(DATE_FORMAT)),
            (Some(s), None) => format!("_from_{}", s.format(DATE_FORMAT)),
            (None, Some(e)) => format!("_until_{}", e.format(DATE_FORMAT)),
            (None, None) => String::new(),
        }
    }
}

impl TryFrom<&DateRangeQuery> for DateRange {
    type Error = AnalyticsError;

    fn try_from(q: &DateRangeQuery) -> AnalyticsResult<Self> {
        DateRange::parse(q.start_date.as_deref(), q.end_date.as_deref())
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> AnalyticsResult<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                AnalyticsError::InvalidRange(format!("{} must be YYYY-MM-DD, got '{}'", name, s))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = DateRange::parse(Some("2024-02-10"), Some("2024-02-09")).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange(_)));
    }

    #[test]
    fn malformed_bound_is_rejected() {
        let err = DateRange::parse(Some("10/02/2024"), None).unwrap_err();
        assert!(err.to_string().contains("start_date"));
    }

    #[test]
    fn empty_strings_are_unbounded() {
        let range = DateRange::parse(Some(""), Some("  ")).unwrap();
        assert_eq!(range, DateRange::unbounded());
    }

    #[test]
    fn single_day_range_keeps_only_that_day() {
        let range = DateRange::parse(Some("2024-01-02"), Some("2024-01-02")).unwrap();
        let dates = [d("2024-01-01"), d("2024-01-02"), d("2024-01-02"), d("2024-01-03")];

        let kept = range.apply(&dates, |x| *x);
        assert_eq!(kept, vec![&dates[1], &dates[2]]);
    }

    #[test]
    fn open_bounds() {
        let from = DateRange::parse(Some("2024-01-02"), None).unwrap();
        assert!(!from.contains(d("2024-01-01")));
        assert!(from.contains(d("2030-01-01")));

        let until = DateRange::parse(None, Some("2024-01-02")).unwrap();
        assert!(until.contains(d("1999-12-31")));
        assert!(!until.contains(d("2024-01-03")));

        assert!(DateRange::unbounded().contains(d("1970-01-01")));
    }

    #[test]
    fn applying_to_empty_input_is_empty() {
        let range = DateRange::parse(Some("2024-01-01"), Some("2024-12-31")).unwrap();
        let none: [NaiveDate; 0] = [];
        assert!(range.apply(&none, |x| *x).is_empty());
    }

    #[test]
    fn filename_suffixes() {
        let both = DateRange::parse(Some("2024-01-01"), Some("2024-03-31")).unwrap();
        assert_eq!(both.filename_suffix(), "_2024-01-01_to_2024-03-31");
        let from = DateRange::parse(Some("2024-01-01"), None).unwrap();
        assert_eq!(from.filename_suffix(), "_from_2024-01-01");
        let until = DateRange::parse(None, Some("2024-03-31")).unwrap();
        assert_eq!(until.filename_suffix(), "_until_2024-03-31");
        assert_eq!(DateRange::unbounded().filename_suffix(), "");
    }
}
