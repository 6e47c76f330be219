//! Fetch-then-aggregate for each report.
//!
//! Every report is computed from one fetch, so all of its fields describe
//! the same row set. A fetch that outlives `timeout` is dropped and the
//! whole report fails; nothing partial is returned.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::{
    AttendanceAnalytics, AttritionAnalytics, DateRange, LeaveAnalytics, attendance, attrition,
    leave,
};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::repository::AnalyticsRepository;

pub async fn with_timeout<T, F>(timeout: Duration, fut: F) -> AnalyticsResult<T>
where
    F: Future<Output = AnalyticsResult<T>>,
{
    actix_web::rt::time::timeout(timeout, fut)
        .await
        .map_err(|_| AnalyticsError::Timeout(timeout))?
}

pub async fn attendance_report(
    repo: &dyn AnalyticsRepository,
    range: &DateRange,
    timeout: Duration,
) -> AnalyticsResult<AttendanceAnalytics> {
    let rows = with_timeout(timeout, repo.attendance_rows(range)).await?;
    debug!(rows = rows.len(), ?range, "Aggregating attendance");
    Ok(attendance::aggregate(&rows))
}

pub async fn leave_report(
    repo: &dyn AnalyticsRepository,
    range: &DateRange,
    timeout: Duration,
) -> AnalyticsResult<LeaveAnalytics> {
    let rows = with_timeout(timeout, repo.leave_rows(range)).await?;
    debug!(rows = rows.len(), ?range, "Aggregating leave");
    Ok(leave::aggregate(&rows))
}

pub async fn attrition_report(
    repo: &dyn AnalyticsRepository,
    range: &DateRange,
    timeout: Duration,
) -> AnalyticsResult<AttritionAnalytics> {
    let employees = with_timeout(timeout, repo.employee_rows()).await?;
    debug!(employees = employees.len(), ?range, "Aggregating attrition");
    Ok(attrition::aggregate(&employees, range))
}
