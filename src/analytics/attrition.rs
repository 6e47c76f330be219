use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DateRange, format_month, month_of, percentage};
use crate::model::employee::EmployeeRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAttrition {
    #[schema(example = "2024-02")]
    pub month: String,
    #[schema(example = 2)]
    pub left_count: u64,
    #[schema(example = 1.6)]
    pub attrition_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttritionAnalytics {
    #[schema(example = 12.5)]
    pub attrition_rate: f64,
    #[schema(example = 15)]
    pub employees_left: u64,
    #[schema(example = 120)]
    pub total_employees: u64,
    pub monthly_trend: Vec<MonthlyAttrition>,
}

/// Builds the attrition report over the full employee table.
///
/// The range restricts which departures are counted; the denominator is
/// always the all-time headcount, for the overall and the monthly rates.
pub fn aggregate(employees: &[EmployeeRow], range: &DateRange) -> AttritionAnalytics {
    let total = employees.len() as u64;

    let mut monthly: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for left_on in employees.iter().filter_map(EmployeeRow::left_on) {
        if range.contains(left_on) {
            *monthly.entry(month_of(left_on)).or_default() += 1;
        }
    }

    let employees_left = monthly.values().sum();

    AttritionAnalytics {
        attrition_rate: percentage(employees_left, total),
        employees_left,
        total_employees: total,
        monthly_trend: monthly
            .into_iter()
            .map(|(month, left_count)| MonthlyAttrition {
                month: format_month(month),
                left_count,
                attrition_rate: percentage(left_count, total),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} 12:00:00", s), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn employee(id: u64, is_active: bool, updated: &str) -> EmployeeRow {
        EmployeeRow {
            id,
            is_active,
            departure_date: None,
            updated_at: ts(updated),
        }
    }

    #[test]
    fn half_the_staff_left() {
        let staff = vec![
            employee(1, false, "2024-01-10"),
            employee(2, false, "2024-02-10"),
            employee(3, true, "2024-02-11"),
            employee(4, true, "2024-03-01"),
        ];

        let report = aggregate(&staff, &DateRange::unbounded());
        assert_eq!(report.attrition_rate, 50.0);
        assert_eq!(report.employees_left, 2);
        assert_eq!(report.total_employees, 4);
    }

    #[test]
    fn no_employees_is_zeroed() {
        let report = aggregate(&[], &DateRange::unbounded());
        assert_eq!(report.attrition_rate, 0.0);
        assert_eq!(report.total_employees, 0);
        assert!(report.monthly_trend.is_empty());
    }

    #[test]
    fn monthly_rates_use_all_time_headcount() {
        let staff = vec![
            employee(1, false, "2024-03-02"),
            employee(2, false, "2024-01-20"),
            employee(3, false, "2024-03-25"),
            employee(4, true, "2024-01-01"),
            employee(5, true, "2024-01-01"),
            employee(6, true, "2024-01-01"),
        ];

        let report = aggregate(&staff, &DateRange::unbounded());
        assert_eq!(
            report.monthly_trend,
            vec![
                MonthlyAttrition { month: "2024-01".into(), left_count: 1, attrition_rate: 16.7 },
                MonthlyAttrition { month: "2024-03".into(), left_count: 2, attrition_rate: 33.3 },
            ]
        );
    }

    #[test]
    fn recorded_departure_date_wins_over_last_modified() {
        let mut leaver = employee(1, false, "2024-06-30");
        leaver.departure_date = Some(date("2024-04-15"));

        let report = aggregate(&[leaver, employee(2, true, "2024-01-01")], &DateRange::unbounded());
        assert_eq!(report.monthly_trend[0].month, "2024-04");
    }

    #[test]
    fn range_filters_departures_not_headcount() {
        let staff = vec![
            employee(1, false, "2024-01-10"),
            employee(2, false, "2024-02-10"),
            employee(3, true, "2024-02-11"),
            employee(4, true, "2023-03-01"),
        ];
        let feb = DateRange::parse(Some("2024-02-01"), Some("2024-02-29")).unwrap();

        let report = aggregate(&staff, &feb);
        assert_eq!(report.employees_left, 1);
        assert_eq!(report.total_employees, 4);
        assert_eq!(report.attrition_rate, 25.0);
        assert_eq!(report.monthly_trend.len(), 1);
    }

    #[test]
    fn rate_matches_formula() {
        for total in 1..30u64 {
            for left in 0..=total {
                let staff: Vec<_> = (0..total).map(|i| employee(i, i >= left, "2024-01-01")).collect();
                let expected = ((left as f64 / total as f64 * 100.0) * 10.0).round() / 10.0;
                assert_eq!(aggregate(&staff, &DateRange::unbounded()).attrition_rate, expected);
            }
        }
    }
}
