//! Show form handling.
//!
//! Neither the referenced venue/artist nor overlapping bookings are checked
//! here; the foreign keys in storage are the only guard.

use chrono::{DateTime, Utc};
use serde::Serialize;
use showbook_core::datetime::{parse_timestamp, to_storage_string};

use super::form::FormFields;
use super::validation::ValidationError;

/// Validated show booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowSubmission {
    pub venue_id: Option<String>,
    pub artist_id: Option<String>,
    pub start_time: Option<String>,
}

impl ShowSubmission {
    pub fn from_form(form: &FormFields) -> Self {
        Self {
            venue_id: form.text("venue_id"),
            artist_id: form.text("artist_id"),
            start_time: form.text("start_time"),
        }
    }

    pub fn into_new_show(self) -> Result<NewShow, ValidationError> {
        let start_time = match self.start_time.as_deref().map(str::trim) {
            None | Some("") => return Err(ValidationError::Empty { field: "start_time" }),
            Some(raw) => parse_timestamp(raw).map_err(|e| ValidationError::InvalidFormat {
                field: "start_time",
                reason: e.to_string(),
            })?,
        };

        Ok(NewShow {
            venue_id: parse_id("venue_id", self.venue_id)?,
            artist_id: parse_id("artist_id", self.artist_id)?,
            start_time,
        })
    }
}

fn parse_id(field: &'static str, value: Option<String>) -> Result<i64, ValidationError> {
    let value = value.unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: format!("'{}' is not a numeric id", value),
        })
}

/// Show form as the create page shows it; start time defaults to now.
#[derive(Debug, Clone, Serialize)]
pub struct ShowForm {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: String,
}

impl ShowForm {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            venue_id: None,
            artist_id: None,
            start_time: to_storage_string(&now),
        }
    }
}
