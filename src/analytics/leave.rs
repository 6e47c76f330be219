use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{format_month, month_of};
use crate::model::leave::{LeaveRow, LeaveType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveByType {
    #[schema(example = 8)]
    pub sick: u64,
    #[schema(example = 10)]
    pub vacation: u64,
    #[schema(example = 0)]
    pub personal: u64,
}

impl LeaveByType {
    fn add(&mut self, leave_type: LeaveType, days: u64) {
        match leave_type {
            LeaveType::Sick => self.sick += days,
            LeaveType::Vacation => self.vacation += days,
            LeaveType::Personal => self.personal += days,
        }
    }

    pub fn total(&self) -> u64 {
        self.sick + self.vacation + self.personal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyLeave {
    #[schema(example = "2024-01")]
    pub month: String,
    #[schema(example = 12)]
    pub days: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveAnalytics {
    pub leave_by_type: LeaveByType,
    #[schema(example = 18)]
    pub total_leave_days: u64,
    pub monthly_trend: Vec<MonthlyLeave>,
}

/// Builds the leave report from rows whose `start_date` passed the filter.
/// Leaves are bucketed by the month they start in.
pub fn aggregate(rows: &[LeaveRow]) -> LeaveAnalytics {
    let mut by_type = LeaveByType::default();
    let mut monthly: BTreeMap<(i32, u32), u64> = BTreeMap::new();

    for row in rows {
        let days = u64::from(row.days);
        by_type.add(row.leave_type, days);
        *monthly.entry(month_of(row.start_date)).or_default() += days;
    }

    LeaveAnalytics {
        total_leave_days: by_type.total(),
        leave_by_type: by_type,
        monthly_trend: monthly
            .into_iter()
            .map(|(month, days)| MonthlyLeave { month: format_month(month), days })
            .collect(),
    }
}
