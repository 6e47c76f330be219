use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::{TryStreamExt, future};
use sqlx::MySqlPool;
use tracing::debug;

use super::{AnalyticsRepository, EmployeeFilter, EmployeeRepository};
use crate::analytics::DateRange;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::{
    attendance::{AttendanceRow, AttendanceSql},
    employee::{Employee, EmployeeRow},
    leave::{LeaveRow, LeaveSql},
};
use crate::utils::db_utils::{SqlFilter, SqlValue, bind_values};

const EMPLOYEE_SELECT: &str = r#"
    SELECT
        e.id,
        e.name,
        e.department,
        e.hire_date,
        e.is_active,
        e.departure_date,
        e.created_at,
        e.updated_at,
        (SELECT COUNT(*) FROM attendance a WHERE a.employee_id = e.id) AS attendance_count,
        (SELECT COUNT(*) FROM leaves l WHERE l.employee_id = e.id) AS leave_count
    FROM employees e
"#;

#[derive(Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn select_employees(&self, filter: &SqlFilter) -> AnalyticsResult<Vec<Employee>> {
        let sql = format!("{}{} ORDER BY e.name", EMPLOYEE_SELECT, filter.where_clause());
        debug!(sql = %sql, bindings = ?filter.values, "Fetching employees");

        let employees = bind_values(sqlx::query_as::<_, Employee>(&sql), &filter.values)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }
}

#[async_trait]
impl AnalyticsRepository for MySqlRepository {
    async fn attendance_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<AttendanceRow>> {
        let mut filter = SqlFilter::new();
        filter.date_range("a.date", range);

        let sql = format!(
            r#"
            SELECT a.employee_id, e.department, a.date, a.status
            FROM attendance a
            JOIN employees e ON e.id = a.employee_id
            {}
            ORDER BY a.date
            "#,
            filter.where_clause()
        );
        debug!(sql = %sql, bindings = ?filter.values, "Fetching attendance rows");

        bind_values(sqlx::query_as::<_, AttendanceSql>(&sql), &filter.values)
            .fetch(&self.pool)
            .map_err(AnalyticsError::from)
            .and_then(|raw| future::ready(AttendanceRow::try_from(raw)))
            .try_collect()
            .await
    }

    async fn leave_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<LeaveRow>> {
        let mut filter = SqlFilter::new();
        filter.date_range("l.start_date", range);

        let sql = format!(
            r#"
            SELECT l.employee_id, l.leave_type, l.start_date, l.end_date, l.days
            FROM leaves l
            {}
            ORDER BY l.start_date
            "#,
            filter.where_clause()
        );
        debug!(sql = %sql, bindings = ?filter.values, "Fetching leave rows");

        bind_values(sqlx::query_as::<_, LeaveSql>(&sql), &filter.values)
            .fetch(&self.pool)
            .map_err(AnalyticsError::from)
            .and_then(|raw| future::ready(LeaveRow::try_from(raw)))
            .try_collect()
            .await
    }

    async fn employee_rows(&self) -> AnalyticsResult<Vec<EmployeeRow>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, is_active, departure_date, updated_at
            FROM employees
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl EmployeeRepository for MySqlRepository {
    async fn list_employees(&self, query: &EmployeeFilter) -> AnalyticsResult<Vec<Employee>> {
        let mut filter = SqlFilter::new();
        if let Some(department) = &query.department {
            filter.push("e.department = ?", SqlValue::String(department.clone()));
        }
        if let Some(is_active) = query.is_active {
            filter.push("e.is_active = ?", SqlValue::Bool(is_active));
        }
        self.select_employees(&filter).await
    }

    async fn get_employee(&self, id: u64) -> AnalyticsResult<Option<Employee>> {
        let mut filter = SqlFilter::new();
        filter.push("e.id = ?", SqlValue::U64(id));
        Ok(self.select_employees(&filter).await?.into_iter().next())
    }

    async fn deactivate_employee(&self, id: u64, departure_date: NaiveDate) -> AnalyticsResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET is_active = FALSE, departure_date = ?, updated_at = NOW()
            WHERE id = ? AND is_active = TRUE
            "#,
        )
        .bind(departure_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
