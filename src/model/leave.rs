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
pub enum LeaveType {
    Sick,
    Vacation,
    Personal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRow {
    pub employee_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Stored day count. Trusted as-is, never recomputed from the date span.
    pub days: u32,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LeaveSql {
    pub employee_id: u64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i32,
}

impl TryFrom<LeaveSql> for LeaveRow {
    type Error = AnalyticsError;

    fn try_from(raw: LeaveSql) -> Result<Self, Self::Error> {
        let leave_type = raw.leave_type.parse().map_err(|_| {
            AnalyticsError::Internal(format!("unknown leave type '{}'", raw.leave_type))
        })?;
        let days = u32::try_from(raw.days)
            .map_err(|_| AnalyticsError::Internal(format!("negative leave days: {}", raw.days)))?;
        Ok(Self {
            employee_id: raw.employee_id,
            leave_type,
            start_date: raw.start_date,
            end_date: raw.end_date,
            days,
        })
    }
}
