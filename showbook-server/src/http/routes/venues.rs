//! Venue endpoints
//!
//! Directory grouped by area, search, detail with show history, and the
//! create/edit/delete form flows.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use showbook_core::GENRE_CHOICES;

use super::{failure_message, reply, EntityRef, FormPage, NoticeReply, SearchPage, StartTime};
use crate::db::repos::{DbError, Venue, VenueRepo, VenueShow, VenueSummary};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, SubmittedForm};
use crate::http::server::AppState;
use crate::models::{
    group_by_area, partition_by_time, Area, Notice, VenueForm, VenueSubmission, STATE_CHOICES,
};

/// One venue in the directory
#[derive(Debug, Serialize)]
pub struct VenueListing {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Serialize)]
pub struct VenuesPage {
    pub areas: Vec<Area<VenueListing>>,
}

impl VenuesPage {
    /// Rows must already be ordered by area.
    fn from_summaries(rows: Vec<VenueSummary>) -> Self {
        let areas = group_by_area(rows.into_iter().map(|v| {
            (
                v.city,
                v.state,
                VenueListing {
                    id: v.id,
                    name: v.name,
                    num_upcoming_shows: v.num_upcoming_shows,
                },
            )
        }));
        Self { areas }
    }
}

/// An artist appearance on the venue page
#[derive(Debug, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(flatten)]
    pub start: StartTime,
}

impl From<VenueShow> for ArtistAppearance {
    fn from(s: VenueShow) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start: StartTime::from(s.start_time),
        }
    }
}

/// Venue detail page
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    fn build(venue: Venue, shows: Vec<VenueShow>, now: DateTime<Utc>) -> Self {
        let (upcoming, past) = partition_by_time(shows, now);
        let past_shows: Vec<ArtistAppearance> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistAppearance> =
            upcoming.into_iter().map(Into::into).collect();

        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

fn form_page(form: VenueForm, record: Option<EntityRef>) -> FormPage<VenueForm> {
    FormPage {
        form,
        record,
        genre_choices: GENRE_CHOICES,
        state_choices: STATE_CHOICES,
    }
}

/// GET /venues - every venue grouped by (city, state)
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<VenuesPage>, ApiError> {
    let rows = VenueRepo::new(&state.pool)
        .list_with_upcoming(Utc::now())
        .await?;
    Ok(Json(VenuesPage::from_summaries(rows)))
}

/// POST /venues/search - case-insensitive substring match on name
async fn search_venues(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Json<SearchPage>, ApiError> {
    let term = form.get("search_term").unwrap_or_default().to_owned();
    let hits = VenueRepo::new(&state.pool).search(&term, Utc::now()).await?;
    tracing::debug!(term = %term, hits = hits.len(), "venue search");
    Ok(Json(SearchPage::new(term, hits)))
}

/// GET /venues/{id}
async fn get_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<VenueDetail>, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;
    let shows = repo.shows(id).await?;
    Ok(Json(VenueDetail::build(venue, shows, Utc::now())))
}

/// GET /venues/create - empty form
async fn create_venue_form() -> Json<FormPage<VenueForm>> {
    Json(form_page(VenueForm::default(), None))
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm,
) -> NoticeReply {
    let submission = VenueSubmission::from_form(&form);
    let failed = failure_message("Venue", submission.display_name(), "listed");

    let fields = match submission.into_fields() {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(error = %e, "rejected venue submission");
            return reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(failed, "/").with_detail(e.to_string()),
            );
        }
    };

    match VenueRepo::new(&state.pool).create(&fields).await {
        Ok(venue) => {
            tracing::info!(id = venue.id, name = %venue.name, "venue listed");
            reply(
                StatusCode::CREATED,
                Notice::success(format!("Venue {} was successfully listed!", venue.name), "/"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to insert venue");
            reply(StatusCode::INTERNAL_SERVER_ERROR, Notice::failure(failed, "/"))
        }
    }
}

/// DELETE /venues/{id} - removes the venue and its shows
async fn delete_venue(State(state): State<Arc<AppState>>, EntityId(id): EntityId) -> NoticeReply {
    match VenueRepo::new(&state.pool).delete(id).await {
        Ok(true) => {
            tracing::info!(id, "venue deleted");
            reply(
                StatusCode::OK,
                Notice::success(format!("Venue {} was successfully deleted.", id), "/"),
            )
        }
        Ok(false) => reply(
            StatusCode::OK,
            Notice::success(format!("No venue {} to delete; nothing was deleted.", id), "/"),
        ),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to delete venue");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::failure(
                    format!("An error occurred. Venue {} could not be deleted.", id),
                    "/",
                ),
            )
        }
    }
}

/// GET /venues/{id}/edit - form prefilled from the stored venue
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<FormPage<VenueForm>>, ApiError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;
    let record = EntityRef {
        id: venue.id,
        name: venue.name.clone(),
    };
    Ok(Json(form_page(VenueForm::from(venue.fields()), Some(record))))
}

/// POST /venues/{id}/edit
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    SubmittedForm(form): SubmittedForm,
) -> Result<NoticeReply, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let current = repo.get(id).await?;
    let redirect = format!("/venues/{}", id);
    let failed = failure_message("Venue", &current.name, "updated");

    let fields = match VenueSubmission::from_form(&form).apply_to(current.fields()) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(id, error = %e, "rejected venue edit");
            return Ok(reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(failed, redirect).with_detail(e.to_string()),
            ));
        }
    };

    match repo.update(id, &fields).await {
        Ok(venue) => {
            tracing::info!(id, "venue updated");
            Ok(reply(
                StatusCode::OK,
                Notice::success(
                    format!("Venue {} was successfully updated!", venue.name),
                    redirect,
                ),
            ))
        }
        // Deleted between the read and the write
        Err(e @ DbError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to update venue");
            Ok(reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::failure(failed, redirect),
            ))
        }
    }
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(get_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
