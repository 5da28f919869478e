//! Timestamp parsing and the English date display filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{CoreError, Result};

/// Layout used when a start time is handed to views.
pub const STORAGE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Display pattern for [`format_timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Wednesday August, 17, 2022 at 8:18PM`
    Full,
    /// `Wed 08, 17, 2022 8:18PM`
    Medium,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Full => "%A %B, %-d, %Y at %-I:%M%p",
            Self::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

/// Parse an ISO-like timestamp.
///
/// RFC 3339 values keep their offset; naive values are taken as UTC.
/// A bare date means midnight.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::invalid_timestamp(value, "empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(CoreError::invalid_timestamp(
        value,
        "expected YYYY-MM-DD HH:MM[:SS] or RFC 3339",
    ))
}

/// Render a timestamp with one of the fixed English patterns.
pub fn format_timestamp(ts: &DateTime<Utc>, style: DateStyle) -> String {
    ts.format(style.pattern()).to_string()
}

/// `YYYY-MM-DD HH:MM:SS`, the shape views receive start times in.
pub fn to_storage_string(ts: &DateTime<Utc>) -> String {
    ts.format(STORAGE_LAYOUT).to_string()
}
