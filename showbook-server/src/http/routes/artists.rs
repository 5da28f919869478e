//! Artist endpoints

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
use crate::db::repos::{Artist, ArtistListItem, ArtistRepo, ArtistShow, DbError};
use crate::http::error::ApiError;
use crate::http::extractors::{EntityId, SubmittedForm};
use crate::http::server::AppState;
use crate::models::{partition_by_time, ArtistForm, ArtistSubmission, Notice, STATE_CHOICES};

#[derive(Debug, Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<ArtistListItem>,
}

/// A booking on the artist page
#[derive(Debug, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    #[serde(flatten)]
    pub start: StartTime,
}

impl From<ArtistShow> for VenueAppearance {
    fn from(s: ArtistShow) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start: StartTime::from(s.start_time),
        }
    }
}

/// Artist detail page
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    fn build(artist: Artist, shows: Vec<ArtistShow>, now: DateTime<Utc>) -> Self {
        let (upcoming, past) = partition_by_time(shows, now);
        let past_shows: Vec<VenueAppearance> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueAppearance> =
            upcoming.into_iter().map(Into::into).collect();

        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

fn form_page(form: ArtistForm, record: Option<EntityRef>) -> FormPage<ArtistForm> {
    FormPage {
        form,
        record,
        genre_choices: GENRE_CHOICES,
        state_choices: STATE_CHOICES,
    }
}

/// GET /artists
async fn list_artists(State(state): State<Arc<AppState>>) -> Result<Json<ArtistsPage>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(Json(ArtistsPage { artists }))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm,
) -> Result<Json<SearchPage>, ApiError> {
    let term = form.get("search_term").unwrap_or_default().to_owned();
    let hits = ArtistRepo::new(&state.pool).search(&term, Utc::now()).await?;
    tracing::debug!(term = %term, hits = hits.len(), "artist search");
    Ok(Json(SearchPage::new(term, hits)))
}

/// GET /artists/{id}
async fn get_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;
    let shows = repo.shows(id).await?;
    Ok(Json(ArtistDetail::build(artist, shows, Utc::now())))
}

/// GET /artists/create
async fn create_artist_form() -> Json<FormPage<ArtistForm>> {
    Json(form_page(ArtistForm::default(), None))
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    SubmittedForm(form): SubmittedForm,
) -> NoticeReply {
    let submission = ArtistSubmission::from_form(&form);
    let failed = failure_message("Artist", submission.display_name(), "listed");

    let fields = match submission.into_fields() {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(error = %e, "rejected artist submission");
            return reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(failed, "/").with_detail(e.to_string()),
            );
        }
    };

    match ArtistRepo::new(&state.pool).create(&fields).await {
        Ok(artist) => {
            tracing::info!(id = artist.id, name = %artist.name, "artist listed");
            reply(
                StatusCode::CREATED,
                Notice::success(
                    format!("Artist {} was successfully listed!", artist.name),
                    "/",
                ),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to insert artist");
            reply(StatusCode::INTERNAL_SERVER_ERROR, Notice::failure(failed, "/"))
        }
    }
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> Result<Json<FormPage<ArtistForm>>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    let record = EntityRef {
        id: artist.id,
        name: artist.name.clone(),
    };
    Ok(Json(form_page(ArtistForm::from(artist.fields()), Some(record))))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    SubmittedForm(form): SubmittedForm,
) -> Result<NoticeReply, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let current = repo.get(id).await?;
    let redirect = format!("/artists/{}", id);
    let failed = failure_message("Artist", &current.name, "updated");

    let fields = match ArtistSubmission::from_form(&form).apply_to(current.fields()) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(id, error = %e, "rejected artist edit");
            return Ok(reply(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notice::failure(failed, redirect).with_detail(e.to_string()),
            ));
        }
    };

    match repo.update(id, &fields).await {
        Ok(artist) => {
            tracing::info!(id, "artist updated");
            Ok(reply(
                StatusCode::OK,
                Notice::success(
                    format!("Artist {} was successfully updated!", artist.name),
                    redirect,
                ),
            ))
        }
        Err(e @ DbError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to update artist");
            Ok(reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::failure(failed, redirect),
            ))
        }
    }
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(get_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn artist() -> Artist {
        Artist {
            id: 4,
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("326-123-5000".into()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website: None,
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            seeking_description: None,
        }
    }

    #[test]
    fn detail_counts_match_lists() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let show = |venue_id: i64, at: DateTime<Utc>| ArtistShow {
            venue_id,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            start_time: at,
        };
        let shows = vec![
            show(1, now - Duration::hours(1)),
            show(3, now + Duration::hours(1)),
            show(3, now + Duration::days(7)),
        ];

        let detail = ArtistDetail::build(artist(), shows, now);
        assert_eq!(detail.past_shows_count, detail.past_shows.len());
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.past_shows[0].venue_id, 1);
    }

    #[test]
    fn no_shows_means_empty_lists() {
        let detail = ArtistDetail::build(artist(), Vec::new(), Utc::now());
        let json = serde_json::to_value(detail).unwrap();
        assert_eq!(json["past_shows_count"], 0);
        assert_eq!(json["upcoming_shows_count"], 0);
        assert_eq!(json["seeking_venue"], true);
        assert_eq!(json["genres"][0], "Rock n Roll");
    }
}
