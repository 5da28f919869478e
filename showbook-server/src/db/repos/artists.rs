//! Artist repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use showbook_core::GenreList;
use sqlx::{FromRow, PgPool};

use super::{DbError, SearchHit};
use crate::models::{like_pattern, ArtistFields, Scheduled};

/// Artist record from database
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn fields(&self) -> ArtistFields {
        ArtistFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            genres: GenreList::from_stored(self.genres.clone()),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistListItem {
    pub id: i64,
    pub name: String,
}

/// A show by an artist, with the hosting venue
#[derive(Debug, Clone, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
     website, genres, seeking_venue, seeking_description";

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every artist, id and name only.
    pub async fn list(&self) -> Result<Vec<ArtistListItem>, DbError> {
        let rows = sqlx::query_as::<_, ArtistListItem>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Artists whose name contains `term`, ignoring case.
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<SearchHit>, DbError> {
        let rows = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $1 ESCAPE '\'
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(like_pattern(term))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        let query = format!("SELECT {} FROM artists WHERE id = $1", ARTIST_COLUMNS);
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "artist",
                id: id.to_string(),
            })
    }

    /// Every show by the artist with the hosting venue.
    pub async fn shows(&self, artist_id: i64) -> Result<Vec<ArtistShow>, DbError> {
        let rows = sqlx::query_as::<_, ArtistShow>(
            r#"
            SELECT
                s.venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO artists (
                name, city, state, phone, image_link, facebook_link,
                website, genres, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            ARTIST_COLUMNS
        );
        let artist = sqlx::query_as::<_, Artist>(&query)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(fields.phone.as_deref())
            .bind(fields.image_link.as_deref())
            .bind(fields.facebook_link.as_deref())
            .bind(fields.website.as_deref())
            .bind(fields.genres.as_slice())
            .bind(fields.seeking_venue)
            .bind(fields.seeking_description.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Overwrite every writable column. Last write wins.
    pub async fn update(&self, id: i64, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                image_link = $6,
                facebook_link = $7,
                website = $8,
                genres = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING {}
            "#,
            ARTIST_COLUMNS
        );
        let artist = sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(fields.phone.as_deref())
            .bind(fields.image_link.as_deref())
            .bind(fields.facebook_link.as_deref())
            .bind(fields.website.as_deref())
            .bind(fields.genres.as_slice())
            .bind(fields.seeking_venue)
            .bind(fields.seeking_description.as_deref())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "artist",
                id: id.to_string(),
            })?;

        tx.commit().await?;
        Ok(artist)
    }
}
