//! Show repository
//!
//! Shows are only ever listed and created. Double-booking is allowed.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::NewShow;

/// Show record from database
#[derive(Debug, Clone, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Show joined with both sides for the listing page
#[derive(Debug, Clone, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every show with venue and artist names, in insertion order.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT
                s.venue_id,
                v.name AS venue_name,
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Book a show.
    ///
    /// An unknown venue or artist id surfaces as [`DbError::MissingReference`].
    pub async fn create(&self, show: &NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Show>(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }
}
