//! Postgres pool sized from the `[database]` config section

use std::time::Duration;

use showbook_core::config::DatabaseSection;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool limits taken from `section`: connection cap and how long a
/// request waits for a free connection before failing.
pub fn pool_options(section: &DatabaseSection) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(section.max_connections)
        .acquire_timeout(Duration::from_secs(section.acquire_timeout_secs))
}

/// Connect to `database_url` with the limits from `section`.
///
/// `section.url` is ignored; callers resolve the URL from flags, env and
/// the config file first.
///
/// ```ignore
/// let pool = connect(&url, &config.database).await?;
/// ```
pub async fn connect(
    database_url: &str,
    section: &DatabaseSection,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = section.max_connections,
        acquire_timeout_secs = section.acquire_timeout_secs,
        "connecting to database"
    );
    pool_options(section).connect(database_url).await
}
