use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{AnalyticsRepository, EmployeeFilter, EmployeeRepository};
use crate::analytics::DateRange;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::{
    attendance::{AttendanceRow, AttendanceStatus},
    employee::{Employee, EmployeeRow},
    leave::{LeaveRow, LeaveType},
};

#[derive(Debug, Clone)]
struct StoredEmployee {
    id: u64,
    name: String,
    department: String,
    hire_date: NaiveDate,
    is_active: bool,
    departure_date: Option<NaiveDate>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
struct StoredAttendance {
    employee_id: u64,
    date: NaiveDate,
    status: AttendanceStatus,
}

#[derive(Debug, Default)]
struct State {
    employees: Vec<StoredEmployee>,
    attendance: Vec<StoredAttendance>,
    leaves: Vec<LeaveRow>,
}

/// Repository over plain vectors, for tests and local demos.
///
/// Filtering goes through [`DateRange::contains`], so results match what
/// the SQL `WHERE` clauses select.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
    latency: Option<Duration>,
    fail: bool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every query, e.g. to exercise request timeouts.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes every query fail as if the database were unreachable.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Adds an active employee and returns its id.
    pub fn add_employee(&self, name: &str, department: &str, hire_date: NaiveDate) -> u64 {
        let mut state = self.write();
        let id = state.employees.len() as u64 + 1;
        let stamp = hire_date.and_time(NaiveTime::default());
        state.employees.push(StoredEmployee {
            id,
            name: name.to_string(),
            department: department.to_string(),
            hire_date,
            is_active: true,
            departure_date: None,
            created_at: stamp,
            updated_at: stamp,
        });
        id
    }

    /// Flips an employee to inactive without recording a departure date,
    /// the way rows predating `departure_date` look.
    pub fn mark_left_without_date(&self, id: u64, updated_at: NaiveDateTime) {
        if let Some(e) = self.write().employees.iter_mut().find(|e| e.id == id) {
            e.is_active = false;
            e.departure_date = None;
            e.updated_at = updated_at;
        }
    }

    pub fn add_attendance(&self, employee_id: u64, date: NaiveDate, status: AttendanceStatus) {
        self.write().attendance.push(StoredAttendance { employee_id, date, status });
    }

    pub fn add_leave(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: u32,
    ) {
        self.write().leaves.push(LeaveRow {
            employee_id,
            leave_type,
            start_date,
            end_date,
            days,
        });
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate(&self) -> AnalyticsResult<()> {
        if let Some(latency) = self.latency {
            actix_web::rt::time::sleep(latency).await;
        }
        if self.fail {
            return Err(AnalyticsError::Upstream(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn summarize(state: &State, e: &StoredEmployee) -> Employee {
        Employee {
            id: e.id,
            name: e.name.clone(),
            department: e.department.clone(),
            hire_date: e.hire_date,
            is_active: e.is_active,
            departure_date: e.departure_date,
            created_at: e.created_at,
            updated_at: e.updated_at,
            attendance_count: state.attendance.iter().filter(|a| a.employee_id == e.id).count() as i64,
            leave_count: state.leaves.iter().filter(|l| l.employee_id == e.id).count() as i64,
        }
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryRepository {
    async fn attendance_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<AttendanceRow>> {
        self.simulate().await?;
        let state = self.read();

        // inner join: records of unknown employees are dropped
        let mut rows: Vec<AttendanceRow> = state
            .attendance
            .iter()
            .filter(|a| range.contains(a.date))
            .filter_map(|a| {
                let employee = state.employees.iter().find(|e| e.id == a.employee_id)?;
                Some(AttendanceRow {
                    employee_id: a.employee_id,
                    department: employee.department.clone(),
                    date: a.date,
                    status: a.status,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.date);
        Ok(rows)
    }

    async fn leave_rows(&self, range: &DateRange) -> AnalyticsResult<Vec<LeaveRow>> {
        self.simulate().await?;
        let state = self.read();

        let mut rows: Vec<LeaveRow> = range
            .apply(&state.leaves, |l| l.start_date)
            .into_iter()
            .cloned()
            .collect();
        rows.sort_by_key(|l| l.start_date);
        Ok(rows)
    }

    async fn employee_rows(&self) -> AnalyticsResult<Vec<EmployeeRow>> {
        self.simulate().await?;
        Ok(self
            .read()
            .employees
            .iter()
            .map(|e| EmployeeRow {
                id: e.id,
                is_active: e.is_active,
                departure_date: e.departure_date,
                updated_at: e.updated_at,
            })
            .collect())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn list_employees(&self, filter: &EmployeeFilter) -> AnalyticsResult<Vec<Employee>> {
        self.simulate().await?;
        let state = self.read();

        let mut employees: Vec<Employee> = state
            .employees
            .iter()
            .filter(|e| filter.department.as_ref().is_none_or(|d| &e.department == d))
            .filter(|e| filter.is_active.is_none_or(|a| e.is_active == a))
            .map(|e| Self::summarize(&state, e))
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    async fn get_employee(&self, id: u64) -> AnalyticsResult<Option<Employee>> {
        self.simulate().await?;
        let state = self.read();
        Ok(state
            .employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| Self::summarize(&state, e)))
    }

    async fn deactivate_employee(&self, id: u64, departure_date: NaiveDate) -> AnalyticsResult<bool> {
        self.simulate().await?;
        let mut state = self.write();
        match state.employees.iter_mut().find(|e| e.id == id && e.is_active) {
            Some(e) => {
                e.is_active = false;
                e.departure_date = Some(departure_date);
                e.updated_at = Utc::now().naive_utc();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
