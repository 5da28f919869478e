//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; a connection is held only for one query or transaction
//! - Upcoming-show counts are JOINed in, compared against a bound `now`
//! - Writes commit explicitly; an early `?` drops the transaction (rollback)

pub mod artists;
pub mod shows;
pub mod venues;

use serde::Serialize;
use sqlx::FromRow;

pub use artists::{Artist, ArtistListItem, ArtistRepo, ArtistShow};
pub use shows::{Show, ShowListing, ShowRepo};
pub use venues::{Venue, VenueRepo, VenueShow, VenueSummary};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Insert/update referenced a row that does not exist
    #[error("missing referenced row ({constraint})")]
    MissingReference { constraint: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return Self::MissingReference {
                    constraint: db_err.constraint().unwrap_or("foreign key").to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}

/// One search result: a venue or artist with its upcoming-show count
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_stays_a_sqlx_error() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::NotFound {
            resource: "venue",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "not found: venue '42'");
    }
}
