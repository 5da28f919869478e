//! Show endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use super::{reply, NoticeReply, StartTime};
use crate::db::repos::{DbError, ShowListing, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::SubmittedForm;
use crate::http::server::AppState;
use crate::models::{Notice, ShowForm, ShowSubmission};

const SHOW_FAILED: &str = "An error occurred. Show could not be listed.";

/// One row of the show listing
#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(flatten)]
    pub start: StartTime,
}

impl From<ShowListing> for ShowEntry {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start: StartTime::from(s.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowEntry>,
}

#[derive(Debug, Serialize)]
pub struct ShowFormPage {
    pub form: ShowForm,
}

/// GET /shows - every show, past and upcoming
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<ShowsPage>, ApiError> {
    let rows = ShowRepo::new(&state.pool).list().await?;
    Ok(Json(ShowsPage {
        shows: rows.into_iter().map(ShowEntry::from).collect(),
    }))
}

/// GET /shows/create - start time prefilled with now
async fn create_show_form() -> Json<ShowFormPage> {
    Json(ShowFormPage {
        form: ShowForm::new(Utc::now()),
    })
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm,
) -> NoticeReply {
    let show = match ShowSubmission::from_form(&form).into_new_show() {
        Ok(show) => show,
        Err(e) => {
            tracing::warn!(error = %e, "rejected show submission");
            return reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(SHOW_FAILED, "/").with_detail(e.to_string()),
            );
        }
    };

    match ShowRepo::new(&state.pool).create(&show).await {
        Ok(created) => {
            tracing::info!(
                id = created.id,
                venue_id = created.venue_id,
                artist_id = created.artist_id,
                "show listed"
            );
            reply(
                StatusCode::CREATED,
                Notice::success("Show was successfully listed!", "/"),
            )
        }
        Err(DbError::MissingReference { constraint }) => {
            tracing::warn!(%constraint, "show references a missing venue or artist");
            reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(SHOW_FAILED, "/")
                    .with_detail("venue_id or artist_id does not match an existing record"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to insert show");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::failure(SHOW_FAILED, "/"),
            )
        }
    }
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
