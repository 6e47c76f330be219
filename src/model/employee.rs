use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee as needed by the attrition report.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: u64,
    pub is_active: bool,
    pub departure_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl EmployeeRow {
    /// Day the employee left, if they have.
    ///
    /// Uses the recorded `departure_date` and falls back to the date of the
    /// last modification for rows deactivated before that column existed.
    pub fn left_on(&self) -> Option<NaiveDate> {
        if self.is_active {
            return None;
        }
        Some(self.departure_date.unwrap_or(self.updated_at.date()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Jane Smith",
        "department": "Engineering",
        "hire_date": "2023-03-01",
        "is_active": true,
        "departure_date": null,
        "created_at": "2023-03-01T09:00:00",
        "updated_at": "2023-03-01T09:00:00",
        "attendance_count": 120,
        "leave_count": 4
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Jane Smith")]
    pub name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2023-03-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = true)]
    pub is_active: bool,

    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub departure_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,

    #[schema(example = 120)]
    pub attendance_count: i64,

    #[schema(example = 4)]
    pub leave_count: i64,
}
