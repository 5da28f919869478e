//! Schema bootstrap without serving

use anyhow::{Context, Result};
use clap::Parser;
use showbook_core::config::DatabaseSection;
use showbook_core::ShowbookConfig;
use showbook_server::db::{connect, migrations};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides the config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create any missing tables and indexes, then exit.
pub async fn run_migrate(args: MigrateArgs, config: &ShowbookConfig) -> Result<()> {
    let database_url = super::database_url(args.database_url, config)?;

    let section = DatabaseSection {
        max_connections: 1,
        ..config.database.clone()
    };
    let pool = connect(&database_url, &section)
        .await
        .context("Failed to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to bootstrap database schema")?;
    pool.close().await;

    println!("Schema is up to date");
    Ok(())
}
