// src/domain/calendar.rs
use crate::domain::DomainError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::fmt::Write;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Time zone in which record timestamps are reduced to calendar days.
///
/// Filtering and display must agree on the zone, otherwise a record shown as
/// `1/5/2024` could be excluded by a filter for 2024-01-05.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// Zone of the machine running the tool, resolved per instant (DST aware).
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DayBoundary {
    pub fn utc() -> Self {
        DayBoundary::Fixed(Utc.fix())
    }

    pub fn calendar_date(&self, timestamp: &DateTime<Utc>) -> NaiveDate {
        match self {
            DayBoundary::Local => timestamp.with_timezone(&Local).date_naive(),
            DayBoundary::Fixed(offset) => timestamp.with_timezone(offset).date_naive(),
        }
    }

    /// Formats the timestamp in this zone. An unusable `format` falls back to
    /// ISO `YYYY-MM-DD` instead of failing.
    pub fn format_date(&self, timestamp: &DateTime<Utc>, format: &str) -> String {
        let format = if validate_date_format(format).is_ok() {
            format
        } else {
            FALLBACK_DATE_FORMAT
        };
        let mut out = String::new();
        let written = match self {
            DayBoundary::Local => write!(out, "{}", timestamp.with_timezone(&Local).format(format)),
            DayBoundary::Fixed(offset) => write!(out, "{}", timestamp.with_timezone(offset).format(format)),
        };
        if written.is_err() {
            out = timestamp.format(FALLBACK_DATE_FORMAT).to_string();
        }
        out
    }
}

/// Rejects strftime patterns chrono cannot render, e.g. `%Q`.
pub fn validate_date_format(format: &str) -> Result<(), DomainError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::Config(format!("invalid date format '{format}'")));
    }
    Ok(())
}
