use crate::api::{analytics, employee, export, health};
use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

/// Builds the shared per-IP limiter configuration.
///
/// Built once in `main` so every worker draws from the same bucket.
pub fn build_limiter(
    requests_per_min: u32,
) -> anyhow::Result<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {} requests/min", requests_per_min))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(health::health);

    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(web::resource("").route(web::get().to(employee::list_employees)))
                    // /employees/{id}
                    .service(web::resource("/{id}").route(web::get().to(employee::get_employee)))
                    // /employees/{id}/deactivate
                    .service(
                        web::resource("/{id}/deactivate")
                            .route(web::put().to(employee::deactivate_employee)),
                    ),
            )
            .service(
                web::resource("/attendance/analytics")
                    .route(web::get().to(analytics::attendance_analytics)),
            )
            .service(
                web::resource("/leave/analytics").route(web::get().to(analytics::leave_analytics)),
            )
            .service(
                web::resource("/attrition/analytics")
                    .route(web::get().to(analytics::attrition_analytics)),
            )
            // /{report}/analytics/export
            .service(
                web::resource("/{report}/analytics/export")
                    .route(web::get().to(export::export_analytics)),
            ),
    );
}
