//! Data access seams.
//!
//! Handlers receive these traits through `web::Data<dyn ...>` so the
//! aggregators can be driven by MySQL in production and by
//! [`memory::InMemoryRepository`] in tests.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::analytics::DateRange;
use crate::error::AnalyticsResult;
use crate::model::{
    attendance::AttendanceRow,
    employee::{Employee, EmployeeRow},
    leave::LeaveRow,
};

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;

/// Read-only access to the rows the reports are computed from.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Attendance rows dated within `range`, joined with their department.
    async fn attendance_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<AttendanceRow>>;

    /// Leave rows whose `start_date` falls within `range`.
    async fn leave_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<LeaveRow>>;

    /// Every employee ever hired, active or not.
    async fn employee_rows(&self) -> AnalyticsResult<Vec<EmployeeRow>>;
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    /// Exact department name
    #[param(example = "Engineering")]
    pub department: Option<String>,
    /// Only active (`true`) or departed (`false`) employees
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Employees ordered by name, with record counts.
    async fn list_employees(&self, filter: &EmployeeFilter) -> AnalyticsResult<Vec<Employee>>;

    async fn get_employee(&self, id: u64) -> AnalyticsResult<Option<Employee>>;

    /// Marks an active employee as departed.
    ///
    /// Returns false when no active employee has this id, leaving any
    /// earlier departure untouched.
    async fn deactivate_employee(&self, id: u64, departure_date: NaiveDate) -> AnalyticsResult<bool>;
}
