//! Venue repository
//!
//! - list: every venue with its upcoming-show count, ordered by area
//! - search: case-insensitive literal substring on name
//! - create/update/delete: one transaction each

use chrono::{DateTime, Utc};
use showbook_core::GenreList;
use sqlx::{FromRow, PgPool};

use super::{DbError, SearchHit};
use crate::models::{like_pattern, Scheduled, VenueFields};

/// Venue record from database
#[derive(Debug, Clone, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    /// Writable columns of this record, for merging an edit onto.
    pub fn fields(&self) -> VenueFields {
        VenueFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            genres: GenreList::from_stored(self.genres.clone()),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

/// Venue with its upcoming-show count for the directory
#[derive(Debug, Clone, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// A show at a venue, with the performing artist
#[derive(Debug, Clone, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website, genres, seeking_talent, seeking_description";

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues with counts of shows starting after `now`.
    ///
    /// Ordered by `(city, state, id)` so callers can group in one pass.
    pub async fn list_with_upcoming(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as::<_, VenueSummary>(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.city, v.state, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Venues whose name contains `term`, ignoring case.
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<SearchHit>, DbError> {
        let rows = sqlx::query_as::<_, SearchHit>(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $1 ESCAPE '\'
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(like_pattern(term))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        let query = format!("SELECT {} FROM venues WHERE id = $1", VENUE_COLUMNS);
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "venue",
                id: id.to_string(),
            })
    }

    /// Every show at the venue with the performing artist.
    pub async fn shows(&self, venue_id: i64) -> Result<Vec<VenueShow>, DbError> {
        let rows = sqlx::query_as::<_, VenueShow>(
            r#"
            SELECT
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a venue.
    pub async fn create(&self, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, image_link, facebook_link,
                website, genres, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            VENUE_COLUMNS
        );
        let venue = sqlx::query_as::<_, Venue>(&query)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(fields.phone.as_deref())
            .bind(fields.image_link.as_deref())
            .bind(fields.facebook_link.as_deref())
            .bind(fields.website.as_deref())
            .bind(fields.genres.as_slice())
            .bind(fields.seeking_talent)
            .bind(fields.seeking_description.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Overwrite every writable column. Last write wins.
    pub async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                image_link = $7,
                facebook_link = $8,
                website = $9,
                genres = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING {}
            "#,
            VENUE_COLUMNS
        );
        let venue = sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(fields.phone.as_deref())
            .bind(fields.image_link.as_deref())
            .bind(fields.facebook_link.as_deref())
            .bind(fields.website.as_deref())
            .bind(fields.genres.as_slice())
            .bind(fields.seeking_talent)
            .bind(fields.seeking_description.as_deref())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "venue",
                id: id.to_string(),
            })?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue and, through the foreign key cascade, its shows.
    ///
    /// Returns `false` when no venue had that id.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_round_trip_stored_genres() {
        let venue = Venue {
            id: 7,
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: Some("914-003-1132".into()),
            image_link: None,
            facebook_link: None,
            website: Some("https://www.theduelingpianos.com".into()),
            genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
            seeking_talent: false,
            seeking_description: None,
        };

        let fields = venue.fields();
        assert_eq!(fields.name, venue.name);
        assert_eq!(fields.genres.as_slice(), venue.genres.as_slice());
        assert_eq!(fields.website, venue.website);
    }
}
