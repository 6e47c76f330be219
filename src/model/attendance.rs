use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::error::AnalyticsError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// One attendance record joined with the owning employee's department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub employee_id: u64,
    pub department: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Raw attendance row as stored; `status` is still the column text.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceSql {
    pub employee_id: u64,
    pub department: String,
    pub date: NaiveDate,
    pub status: String,
}

impl TryFrom<AttendanceSql> for AttendanceRow {
    type Error = AnalyticsError;

    fn try_from(raw: AttendanceSql) -> Result<Self, Self::Error> {
        let status = raw.status.parse().map_err(|_| {
            AnalyticsError::Internal(format!("unknown attendance status '{}'", raw.status))
        })?;
        Ok(Self {
            employee_id: raw.employee_id,
            department: raw.department,
            date: raw.date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: &str) -> AttendanceSql {
        AttendanceSql {
            employee_id: 3,
            department: "Finance".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            status: status.into(),
        }
    }

    #[test]
    fn parses_stored_status() {
        let row = AttendanceRow::try_from(raw("late")).unwrap();
        assert_eq!(row.status, AttendanceStatus::Late);
        assert_eq!(AttendanceStatus::Absent.to_string(), "absent");
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(AttendanceRow::try_from(raw("holiday")).is_err());
    }
}
