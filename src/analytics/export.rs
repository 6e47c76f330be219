//! CSV rendering of the analytics payloads.
//!
//! The header row carries the payload's top-level JSON keys in declaration
//! order. Fields listed in [`CsvReport::SEQUENCES`] contribute entry `i` to
//! row `i`; every other field repeats on each row. Cells hold the JSON text
//! of their value, so numbers keep exactly the digits the JSON payload has.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

use super::{AttendanceAnalytics, AttritionAnalytics, DateRange, LeaveAnalytics};
use crate::error::{AnalyticsError, AnalyticsResult};

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub trait CsvReport: Serialize + DeserializeOwned {
    /// Top-level fields whose entries are spread one per row.
    const SEQUENCES: &'static [&'static str];
}

impl CsvReport for AttendanceAnalytics {
    const SEQUENCES: &'static [&'static str] = &["trend_data", "department_breakdown"];
}

impl CsvReport for LeaveAnalytics {
    const SEQUENCES: &'static [&'static str] = &["monthly_trend"];
}

impl CsvReport for AttritionAnalytics {
    const SEQUENCES: &'static [&'static str] = &["monthly_trend"];
}

/// The exportable reports, addressed by their path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Report {
    Attendance,
    Leave,
    Attrition,
}

impl Report {
    pub fn filename(&self, range: &DateRange) -> String {
        format!("{}_analytics{}.csv", self.as_ref(), range.filename_suffix())
    }
}

pub fn to_csv<R: CsvReport>(report: &R) -> AnalyticsResult<String> {
    let fields = match serde_json::to_value(report).map_err(internal)? {
        Value::Object(map) => map,
        _ => return Err(AnalyticsError::Internal("report is not a JSON object".into())),
    };

    // at least one row so scalar-only payloads still export
    let rows = fields
        .iter()
        .filter(|(k, _)| R::SEQUENCES.contains(&k.as_str()))
        .filter_map(|(_, v)| v.as_array().map(Vec::len))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields.keys())?;

    for i in 0..rows {
        let mut record = Vec::with_capacity(fields.len());
        for (key, value) in &fields {
            let cell = if R::SEQUENCES.contains(&key.as_str()) {
                match value.as_array().and_then(|entries| entries.get(i)) {
                    Some(entry) => serde_json::to_string(entry).map_err(internal)?,
                    None => String::new(),
                }
            } else {
                serde_json::to_string(value).map_err(internal)?
            };
            record.push(cell);
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyticsError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(internal)
}

/// Rebuilds a payload from [`to_csv`] output.
pub fn from_csv<R: CsvReport>(text: &str) -> AnalyticsResult<R> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut fields = Map::new();
    for key in headers.iter() {
        let initial = if R::SEQUENCES.contains(&key) {
            Value::Array(Vec::new())
        } else {
            Value::Null
        };
        fields.insert(key.to_string(), initial);
    }

    for record in reader.records() {
        let record = record?;
        for (key, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(cell).map_err(internal)?;
            match fields.get_mut(key) {
                Some(Value::Array(entries)) => entries.push(value),
                Some(slot @ Value::Null) => *slot = value,
                _ => {}
            }
        }
    }

    serde_json::from_value(Value::Object(fields)).map_err(internal)
}

fn internal<E: std::fmt::Display>(e: E) -> AnalyticsError {
    AnalyticsError::Internal(e.to_string())
}
