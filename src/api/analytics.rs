use actix_web::{HttpResponse, Responder, web};

use crate::analytics::{
    AttendanceAnalytics, AttritionAnalytics, DateRange, DateRangeQuery, LeaveAnalytics, service,
};
use crate::config::Config;
use crate::repository::AnalyticsRepository;

/// Absenteeism rate, daily present/absent trend and per-department rates
#[utoipa::path(
    get,
    path = "/api/attendance/analytics",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Attendance analytics", body = AttendanceAnalytics),
        (status = 400, description = "Invalid date range", body = Object, example = json!({
            "error": "invalid_range",
            "message": "Invalid date range: end_date 2024-01-01 is before start_date 2024-02-01",
            "retryable": false
        })),
        (status = 500, description = "Internal server error"),
        (status = 503, description = "Query timed out, retry later")
    ),
    tag = "Analytics"
)]
pub async fn attendance_analytics(
    repo: web::Data<dyn AnalyticsRepository>,
    config: web::Data<Config>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let range = DateRange::try_from(&*query)?;

    let report = service::attendance_report(repo.get_ref(), &range, config.query_timeout).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Leave days by type and by starting month
#[utoipa::path(
    get,
    path = "/api/leave/analytics",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Leave analytics", body = LeaveAnalytics),
        (status = 400, description = "Invalid date range"),
        (status = 500, description = "Internal server error"),
        (status = 503, description = "Query timed out, retry later")
    ),
    tag = "Analytics"
)]
pub async fn leave_analytics(
    repo: web::Data<dyn AnalyticsRepository>,
    config: web::Data<Config>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let range = DateRange::try_from(&*query)?;

    let report = service::leave_report(repo.get_ref(), &range, config.query_timeout).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Attrition rate and monthly departures.
///
/// The date range selects departures by departure date; the headcount is
/// always every employee ever hired.
#[utoipa::path(
    get,
    path = "/api/attrition/analytics",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Attrition analytics", body = AttritionAnalytics),
        (status = 400, description = "Invalid date range"),
        (status = 500, description = "Internal server error"),
        (status = 503, description = "Query timed out, retry later")
    ),
    tag = "Analytics"
)]
pub async fn attrition_analytics(
    repo: web::Data<dyn AnalyticsRepository>,
    config: web::Data<Config>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let range = DateRange::try_from(&*query)?;

    let report = service::attrition_report(repo.get_ref(), &range, config.query_timeout).await?;

    Ok(HttpResponse::Ok().json(report))
}
