use chrono::NaiveDate;
use sqlx::{MySql, mysql::MySqlArguments, query::QueryAs};

use crate::analytics::DateRange;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Bool(bool),
    U64(u64),
    Date(NaiveDate),
}

/// ===============================
/// WHERE clause container
/// ===============================
#[derive(Debug, Default)]
pub struct SqlFilter {
    conditions: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `condition`, which must contain exactly one `?` placeholder.
    pub fn push(&mut self, condition: &str, value: SqlValue) -> &mut Self {
        self.conditions.push(condition.to_string());
        self.values.push(value);
        self
    }

    /// Restricts `column` to the inclusive range; unbounded sides add nothing.
    pub fn date_range(&mut self, column: &str, range: &DateRange) -> &mut Self {
        if let Some(start) = range.start() {
            self.push(&format!("{} >= ?", column), SqlValue::Date(start));
        }
        if let Some(end) = range.end() {
            self.push(&format!("{} <= ?", column), SqlValue::Date(end));
        }
        self
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }
}

/// ===============================
/// Bind filter values in order
/// ===============================
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    values: &[SqlValue],
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::String(v) => query.bind(v.clone()),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::U64(v) => query.bind(*v),
            SqlValue::Date(v) => query.bind(*v),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_range_has_no_where_clause() {
        let mut filter = SqlFilter::new();
        filter.date_range("a.date", &DateRange::unbounded());
        assert_eq!(filter.where_clause(), "");
        assert!(filter.values.is_empty());
    }

    #[test]
    fn bounds_become_placeholders_in_order() {
        let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let mut filter = SqlFilter::new();
        filter
            .date_range("l.start_date", &range)
            .push("e.department = ?", SqlValue::String("Eng".into()));

        assert_eq!(
            filter.where_clause(),
            " WHERE l.start_date >= ? AND l.start_date <= ? AND e.department = ?"
        );
        assert_eq!(filter.values.len(), 3);
        assert_eq!(filter.values[0], SqlValue::Date(range.start().unwrap()));
    }

    #[test]
    fn half_open_range_binds_one_value() {
        let range = DateRange::parse(None, Some("2024-06-30")).unwrap();
        let mut filter = SqlFilter::new();
        filter.date_range("a.date", &range);
        assert_eq!(filter.where_clause(), " WHERE a.date <= ?");
    }
}
