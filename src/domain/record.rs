// src/domain/record.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::domain::DayBoundary;

/// One note entry as returned by the note-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    #[serde(rename = "qrCodeData")]
    pub query_key: String,
    pub quantity: Number,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub note: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
}

impl NoteRecord {
    pub fn calendar_date(&self, boundary: &DayBoundary) -> NaiveDate {
        boundary.calendar_date(&self.date)
    }

    pub fn display_date(&self, boundary: &DayBoundary, format: &str) -> String {
        boundary.format_date(&self.date, format)
    }
}

/// Parse the timestamp forms the endpoint has been seen to emit.
///
/// Naive values carry no zone and are read as UTC; a bare date is UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date: {raw}")))
}
