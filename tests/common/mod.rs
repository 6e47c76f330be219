#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web::Data;
use chrono::NaiveDate;
use hr_analytics::config::Config;
use hr_analytics::model::attendance::AttendanceStatus;
use hr_analytics::model::leave::LeaveType;
use hr_analytics::repository::{AnalyticsRepository, EmployeeRepository, InMemoryRepository};

pub const TIMEOUT: Duration = Duration::from_secs(10);

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn test_config(query_timeout: Duration) -> Config {
    Config {
        database_url: String::new(),
        server_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
        query_timeout,
        rate_analytics_per_min: 600,
        cors_allowed_origin: None,
        log_dir: "logs".to_string(),
        api_prefix: "/api".to_string(),
    }
}

pub fn repo_data(
    repo: Arc<InMemoryRepository>,
) -> (Data<dyn AnalyticsRepository>, Data<dyn EmployeeRepository>) {
    (
        Data::from(repo.clone() as Arc<dyn AnalyticsRepository>),
        Data::from(repo as Arc<dyn EmployeeRepository>),
    )
}

/// Builds the service the same way `main` does, minus middleware.
macro_rules! init_app {
    ($repo:expr) => {
        init_app!($repo, common::TIMEOUT)
    };
    ($repo:expr, $timeout:expr) => {{
        let (analytics, employees) = common::repo_data($repo);
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(analytics)
                .app_data(employees)
                .app_data(actix_web::web::Data::new(common::test_config($timeout)))
                .configure(|cfg| hr_analytics::routes::configure(cfg, "/api")),
        )
        .await
    }};
}

/// Two engineers absent and one HR employee present on 2024-01-02,
/// plus the leave and attrition worked examples.
pub fn seeded_repo() -> Arc<InMemoryRepository> {
    let repo = InMemoryRepository::new();

    let ann = repo.add_employee("Ann", "Eng", d("2023-01-01"));
    let bo = repo.add_employee("Bo", "Eng", d("2023-01-01"));
    let cat = repo.add_employee("Cat", "HR", d("2023-01-01"));
    repo.add_employee("Dan", "HR", d("2023-01-01"));

    repo.add_attendance(ann, d("2024-01-02"), AttendanceStatus::Absent);
    repo.add_attendance(bo, d("2024-01-02"), AttendanceStatus::Absent);
    repo.add_attendance(cat, d("2024-01-02"), AttendanceStatus::Present);

    repo.add_leave(ann, LeaveType::Sick, d("2024-01-08"), d("2024-01-12"), 5);
    repo.add_leave(bo, LeaveType::Vacation, d("2024-02-05"), d("2024-02-16"), 10);
    repo.add_leave(cat, LeaveType::Sick, d("2024-02-20"), d("2024-02-22"), 3);

    repo.mark_left_without_date(ann, d("2024-03-15").and_hms_opt(10, 0, 0).unwrap());
    repo.mark_left_without_date(bo, d("2024-05-01").and_hms_opt(10, 0, 0).unwrap());

    Arc::new(repo)
}
