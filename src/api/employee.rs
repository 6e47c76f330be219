use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::analytics::service::with_timeout;
use crate::config::Config;
use crate::error::AnalyticsError;
use crate::model::employee::Employee;
use crate::repository::{EmployeeFilter, EmployeeRepository};

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 10)]
    pub total: usize,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeactivateEmployee {
    /// Last working day; today when omitted
    #[schema(example = "2024-03-31", value_type = Option<String>, format = "date")]
    pub departure_date: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Employees ordered by name", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    repo: web::Data<dyn EmployeeRepository>,
    config: web::Data<Config>,
    query: web::Query<EmployeeFilter>,
) -> actix_web::Result<impl Responder> {
    let data = with_timeout(config.query_timeout, repo.list_employees(&query)).await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "not_found",
            "message": "Employee 42 not found",
            "retryable": false
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    repo: web::Data<dyn EmployeeRepository>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = with_timeout(config.query_timeout, repo.get_employee(employee_id))
        .await?
        .ok_or_else(|| AnalyticsError::NotFound(format!("Employee {}", employee_id)))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Record a voluntary departure
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}/deactivate",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = DeactivateEmployee,
    responses(
        (status = 200, description = "Employee deactivated", body = Object, example = json!({
            "message": "Employee deactivated",
            "departure_date": "2024-03-31"
        })),
        (status = 400, description = "Already inactive, or departure before hire date"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn deactivate_employee(
    repo: web::Data<dyn EmployeeRepository>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    body: web::Json<DeactivateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let timeout = config.query_timeout;

    let current = with_timeout(timeout, repo.get_employee(employee_id))
        .await?
        .ok_or_else(|| AnalyticsError::NotFound(format!("Employee {}", employee_id)))?;

    if !current.is_active {
        return Err(already_inactive(employee_id).into());
    }

    let departure_date = body.departure_date.unwrap_or_else(|| Utc::now().date_naive());
    if departure_date < current.hire_date {
        return Err(AnalyticsError::BadRequest(format!(
            "departure_date {} is before hire_date {}",
            departure_date, current.hire_date
        ))
        .into());
    }

    // matches active rows only; nothing updated means another request got there first
    if !with_timeout(timeout, repo.deactivate_employee(employee_id, departure_date)).await? {
        let err = match with_timeout(timeout, repo.get_employee(employee_id)).await? {
            Some(_) => already_inactive(employee_id),
            None => AnalyticsError::NotFound(format!("Employee {}", employee_id)),
        };
        return Err(err.into());
    }

    info!(employee_id, %departure_date, "Employee deactivated");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deactivated",
        "departure_date": departure_date,
    })))
}

fn already_inactive(employee_id: u64) -> AnalyticsError {
    AnalyticsError::BadRequest(format!("Employee {} is already inactive", employee_id))
}
