use actix_web::{HttpResponse, http::header::ContentDisposition, web};
use tracing::info;

use crate::analytics::{
    DateRange, DateRangeQuery,
    export::{self, Report},
    service,
};
use crate::config::Config;
use crate::error::AnalyticsError;
use crate::repository::AnalyticsRepository;

/// Download one report as CSV
#[utoipa::path(
    get,
    path = "/api/{report}/analytics/export",
    params(
        ("report" = String, Path, description = "attendance, leave or attrition"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Unknown report"),
        (status = 500, description = "Internal server error"),
        (status = 503, description = "Query timed out, retry later")
    ),
    tag = "Analytics"
)]
pub async fn export_analytics(
    repo: web::Data<dyn AnalyticsRepository>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<HttpResponse> {
    let name = path.into_inner();
    let report: Report = name
        .parse()
        .map_err(|_| AnalyticsError::NotFound(format!("Report '{}'", name)))?;
    let range = DateRange::try_from(&*query)?;
    let timeout = config.query_timeout;

    let body = match report {
        Report::Attendance => {
            export::to_csv(&service::attendance_report(repo.get_ref(), &range, timeout).await?)?
        }
        Report::Leave => {
            export::to_csv(&service::leave_report(repo.get_ref(), &range, timeout).await?)?
        }
        Report::Attrition => {
            export::to_csv(&service::attrition_report(repo.get_ref(), &range, timeout).await?)?
        }
    };

    let filename = report.filename(&range);
    info!(%report, filename = %filename, bytes = body.len(), "Exported analytics");

    Ok(HttpResponse::Ok()
        .content_type(export::CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(filename))
        .body(body))
}
