//! Schema bootstrap for venues, artists and shows

use sqlx::PgPool;

use super::repos::DbError;

/// Create all tables and indexes if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running showbook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT,
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Deleting a venue (or artist) takes its shows with it
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id BIGSERIAL PRIMARY KEY,
            venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            start_time TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("showbook migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(city, state)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)")
        .execute(pool)
        .await?;

    Ok(())
}
