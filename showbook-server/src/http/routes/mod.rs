//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use showbook_core::datetime::{format_timestamp, to_storage_string, DateStyle};

use crate::db::repos::SearchHit;
use crate::models::Notice;

/// Status plus notice body, the reply of every create/edit/delete
pub type NoticeReply = (StatusCode, Json<Notice>);

pub(crate) fn reply(status: StatusCode, notice: Notice) -> NoticeReply {
    (status, Json(notice))
}

/// `"An error occurred. Venue Hall could not be listed."`; a blank name is left out.
pub(crate) fn failure_message(kind: &str, name: &str, action: &str) -> String {
    if name.is_empty() {
        format!("An error occurred. {} could not be {}.", kind, action)
    } else {
        format!("An error occurred. {} {} could not be {}.", kind, name, action)
    }
}

/// Start time in the storage shape plus the "full" and "medium" display shapes
#[derive(Debug, Clone, Serialize)]
pub struct StartTime {
    pub start_time: String,
    pub start_time_display: String,
    pub start_time_short: String,
}

impl From<DateTime<Utc>> for StartTime {
    fn from(ts: DateTime<Utc>) -> Self {
        Self {
            start_time: to_storage_string(&ts),
            start_time_display: format_timestamp(&ts, DateStyle::Full),
            start_time_short: format_timestamp(&ts, DateStyle::Medium),
        }
    }
}

/// `{id, name}` of the record a form edits
#[derive(Debug, Clone, Serialize)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

/// Create/edit form page
#[derive(Debug, Clone, Serialize)]
pub struct FormPage<F> {
    pub form: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<EntityRef>,
    pub genre_choices: &'static [&'static str],
    pub state_choices: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Search page: the echoed term plus the hits
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}

impl SearchPage {
    pub fn new(search_term: String, hits: Vec<SearchHit>) -> Self {
        Self {
            search_term,
            results: SearchResults {
                count: hits.len(),
                data: hits,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_time_shapes() {
        let ts = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        let start = StartTime::from(ts);
        assert_eq!(start.start_time, "2035-04-01 20:00:00");
        assert_eq!(start.start_time_display, "Sunday April, 1, 2035 at 8:00PM");
        assert_eq!(start.start_time_short, "Sun 04, 01, 2035 8:00PM");
    }

    #[test]
    fn failure_message_skips_blank_name() {
        assert_eq!(
            failure_message("Venue", "Hall", "listed"),
            "An error occurred. Venue Hall could not be listed."
        );
        assert_eq!(
            failure_message("Artist", "", "listed"),
            "An error occurred. Artist could not be listed."
        );
    }

    #[test]
    fn search_page_counts_hits() {
        let hits = vec![
            SearchHit {
                id: 1,
                name: "The Grand HALL".into(),
                num_upcoming_shows: 2,
            },
            SearchHit {
                id: 5,
                name: "Hall of Fame".into(),
                num_upcoming_shows: 0,
            },
        ];
        let page = SearchPage::new("hall".into(), hits);
        assert_eq!(page.results.count, 2);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["search_term"], "hall");
        assert_eq!(json["results"]["data"][0]["num_upcoming_shows"], 2);
    }
}
