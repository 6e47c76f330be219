use crate::analytics::attendance::{AttendanceAnalytics, DailyAttendance, DepartmentAbsenteeism};
use crate::analytics::attrition::{AttritionAnalytics, MonthlyAttrition};
use crate::analytics::leave::{LeaveAnalytics, LeaveByType, MonthlyLeave};
use crate::api::employee::{DeactivateEmployee, EmployeeListResponse};
use crate::model::attendance::AttendanceStatus;
use crate::model::employee::Employee;
use crate::model::leave::LeaveType;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Analytics API",
        version = "0.1.0",
        description = r#"
## HR Analytics

Aggregated views over employee, attendance and leave records, built for an
HR dashboard.

### Reports
- **Attendance**: absenteeism rate, daily present/absent trend, per-department rates
- **Leave**: days taken by type (sick, vacation, personal) and per month
- **Attrition**: share of employees who left, and departures per month

Every report accepts optional `start_date` / `end_date` (`YYYY-MM-DD`,
inclusive) and can be downloaded as CSV from `/{report}/analytics/export`.

### Errors
- `400` invalid or inverted date range
- `404` unknown employee or report
- `500` database failure
- `503` query timed out; safe to retry

Percentages are rounded to one decimal.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::analytics::attendance_analytics,
        crate::api::analytics::leave_analytics,
        crate::api::analytics::attrition_analytics,
        crate::api::export::export_analytics,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::deactivate_employee
    ),
    components(
        schemas(
            AttendanceAnalytics,
            DailyAttendance,
            DepartmentAbsenteeism,
            LeaveAnalytics,
            LeaveByType,
            MonthlyLeave,
            AttritionAnalytics,
            MonthlyAttrition,
            AttendanceStatus,
            LeaveType,
            Employee,
            EmployeeListResponse,
            DeactivateEmployee
        )
    ),
    tags(
        (name = "Analytics", description = "Attendance, leave and attrition reports"),
        (name = "Employee", description = "Employee directory"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_report() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/api/attendance/analytics",
            "/api/leave/analytics",
            "/api/attrition/analytics",
            "/api/{report}/analytics/export",
            "/api/employees/{employee_id}",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }
}
