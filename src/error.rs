use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors surfaced by the analytics core and its HTTP layer.
///
/// An empty row set is never an error; aggregators return zeroed payloads.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    // 4xx
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    // 5xx
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Upstream query failed: {0}")]
    Upstream(#[from] sqlx::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidRange(_) => "invalid_range",
            AnalyticsError::BadRequest(_) => "bad_request",
            AnalyticsError::NotFound(_) => "not_found",
            AnalyticsError::Timeout(_) => "timeout",
            AnalyticsError::Upstream(_) => "upstream_query_error",
            AnalyticsError::Export(_) => "export_error",
            AnalyticsError::Internal(_) => "internal_error",
        }
    }

    /// Whether the caller may simply repeat the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalyticsError::Timeout(_))
    }
}

impl ResponseError for AnalyticsError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::InvalidRange(_) | AnalyticsError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalyticsError::NotFound(_) => StatusCode::NOT_FOUND,
            AnalyticsError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AnalyticsError::Upstream(_)
            | AnalyticsError::Export(_)
            | AnalyticsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Never leak driver messages to clients.
        let message = if status.is_server_error() && !self.is_retryable() {
            tracing::error!(error = %self, "Analytics request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(json!({
            "error": self.code(),
            "message": message,
            "retryable": self.is_retryable(),
        }))
    }
}
