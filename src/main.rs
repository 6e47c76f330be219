use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::Governor;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hr_analytics::config::Config;
use hr_analytics::db::init_db;
use hr_analytics::docs::ApiDoc;
use hr_analytics::repository::{AnalyticsRepository, EmployeeRepository, MySqlRepository};
use hr_analytics::routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config)
        .await
        .context("Failed to connect to database")?;

    let mysql = Arc::new(MySqlRepository::new(pool));
    let analytics_repo: Data<dyn AnalyticsRepository> =
        Data::from(mysql.clone() as Arc<dyn AnalyticsRepository>);
    let employee_repo: Data<dyn EmployeeRepository> =
        Data::from(mysql as Arc<dyn EmployeeRepository>);

    let limiter = routes::build_limiter(config.rate_analytics_per_min)?;
    let server_addr = config.server_addr.clone();
    let config_data = Data::new(config);

    HttpServer::new(move || {
        let cors = match &config_data.cors_allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "PUT"])
                .allow_any_header()
                .max_age(3600),
            None => Cors::permissive(),
        };
        let api_prefix = config_data.api_prefix.clone();

        App::new()
            .wrap(Governor::new(&limiter))
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard matches JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(analytics_repo.clone())
            .app_data(employee_repo.clone())
            .app_data(config_data.clone())
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
