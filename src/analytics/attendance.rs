use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::percentage;
use crate::model::attendance::{AttendanceRow, AttendanceStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendance {
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 42)]
    pub present_count: u64,
    #[schema(example = 3)]
    pub absent_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentAbsenteeism {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 4.2)]
    pub absenteeism_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceAnalytics {
    #[schema(example = 5.3)]
    pub absenteeism_rate: f64,
    #[schema(example = 1200)]
    pub total_working_days: u64,
    #[schema(example = 64)]
    pub total_absent_days: u64,
    pub trend_data: Vec<DailyAttendance>,
    pub department_breakdown: Vec<DepartmentAbsenteeism>,
}

/// Row and absence counts for one bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total: u64,
    pub absent: u64,
}

impl Tally {
    fn add(&mut self, status: AttendanceStatus) {
        self.total += 1;
        if status == AttendanceStatus::Absent {
            self.absent += 1;
        }
    }
}

/// Per-department tallies. Every row lands in exactly one bucket.
pub fn department_tallies(rows: &[AttendanceRow]) -> BTreeMap<&str, Tally> {
    let mut buckets: BTreeMap<&str, Tally> = BTreeMap::new();
    for row in rows {
        buckets.entry(row.department.as_str()).or_default().add(row.status);
    }
    buckets
}

/// Builds the attendance report from already filtered rows.
pub fn aggregate(rows: &[AttendanceRow]) -> AttendanceAnalytics {
    let mut overall = Tally::default();
    let mut daily: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();

    for row in rows {
        overall.add(row.status);

        // late rows count as worked days but sit in neither trend bucket
        let day = daily.entry(row.date).or_default();
        match row.status {
            AttendanceStatus::Present => day.0 += 1,
            AttendanceStatus::Absent => day.1 += 1,
            AttendanceStatus::Late => {}
        }
    }

    let trend_data = daily
        .into_iter()
        .map(|(date, (present_count, absent_count))| DailyAttendance {
            date,
            present_count,
            absent_count,
        })
        .collect();

    let department_breakdown = department_tallies(rows)
        .into_iter()
        .map(|(department, tally)| DepartmentAbsenteeism {
            department: department.to_string(),
            absenteeism_rate: percentage(tally.absent, tally.total),
        })
        .collect();

    AttendanceAnalytics {
        absenteeism_rate: percentage(overall.absent, overall.total),
        total_working_days: overall.total,
        total_absent_days: overall.absent,
        trend_data,
        department_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dept: &str, date: &str, status: AttendanceStatus) -> AttendanceRow {
        AttendanceRow {
            employee_id: 1,
            department: dept.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status,
        }
    }

    #[test]
    fn two_absent_engineers_one_present_hr() {
        let rows = vec![
            row("Eng", "2024-01-02", AttendanceStatus::Absent),
            row("Eng", "2024-01-02", AttendanceStatus::Absent),
            row("HR", "2024-01-02", AttendanceStatus::Present),
        ];

        let report = aggregate(&rows);
        assert_eq!(report.absenteeism_rate, 66.7);
        assert_eq!(report.total_working_days, 3);
        assert_eq!(report.total_absent_days, 2);
        assert_eq!(
            report.department_breakdown,
            vec![
                DepartmentAbsenteeism { department: "Eng".into(), absenteeism_rate: 100.0 },
                DepartmentAbsenteeism { department: "HR".into(), absenteeism_rate: 0.0 },
            ]
        );
    }

    #[test]
    fn empty_set_is_zeroed() {
        let report = aggregate(&[]);
        assert_eq!(report.absenteeism_rate, 0.0);
        assert_eq!(report.total_working_days, 0);
        assert_eq!(report.total_absent_days, 0);
        assert!(report.trend_data.is_empty());
        assert!(report.department_breakdown.is_empty());
    }

    #[test]
    fn trend_is_ascending_and_ignores_late() {
        let rows = vec![
            row("Ops", "2024-01-03", AttendanceStatus::Present),
            row("Ops", "2024-01-01", AttendanceStatus::Late),
            row("Ops", "2024-01-01", AttendanceStatus::Absent),
            row("Ops", "2024-01-03", AttendanceStatus::Late),
        ];

        let report = aggregate(&rows);
        assert_eq!(report.total_working_days, 4);
        assert_eq!(report.absenteeism_rate, 25.0);

        let dates: Vec<_> = report.trend_data.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
        assert_eq!((report.trend_data[0].present_count, report.trend_data[0].absent_count), (0, 1));
        assert_eq!((report.trend_data[1].present_count, report.trend_data[1].absent_count), (1, 0));
    }

    #[test]
    fn department_tallies_partition_rows() {
        let rows = vec![
            row("Eng", "2024-01-01", AttendanceStatus::Present),
            row("Sales", "2024-01-01", AttendanceStatus::Late),
            row("Eng", "2024-01-02", AttendanceStatus::Absent),
            row("HR", "2024-01-02", AttendanceStatus::Absent),
            row("Sales", "2024-01-03", AttendanceStatus::Present),
        ];

        let tallies = department_tallies(&rows);
        let sum: u64 = tallies.values().map(|t| t.total).sum();
        assert_eq!(sum, rows.len() as u64);
        assert_eq!(tallies["Eng"], Tally { total: 2, absent: 1 });

        let report = aggregate(&rows);
        assert_eq!(report.department_breakdown.len(), 3);
        assert_eq!(report.department_breakdown[0].department, "Eng");
        assert_eq!(report.department_breakdown[0].absenteeism_rate, 50.0);
    }

    #[test]
    fn rate_matches_formula_for_many_sizes() {
        for total in 1..40u64 {
            for absent in 0..=total {
                let rows: Vec<_> = (0..total)
                    .map(|i| {
                        let status = if i < absent { AttendanceStatus::Absent } else { AttendanceStatus::Present };
                        row("Eng", "2024-05-01", status)
                    })
                    .collect();
                let expected = ((absent as f64 / total as f64 * 100.0) * 10.0).round() / 10.0;
                assert_eq!(aggregate(&rows).absenteeism_rate, expected);
            }
        }
    }
}
