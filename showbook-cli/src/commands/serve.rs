//! HTTP server command
//!
//! Bootstraps the schema, then serves until Ctrl+C / SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use showbook_core::config::DatabaseSection;
use showbook_core::ShowbookConfig;
use showbook_server::db::{connect, migrations};
use showbook_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "SHOWBOOK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides the config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

/// Everything `serve` needs once flags, env and config file are merged
#[derive(Debug)]
struct ServeSettings {
    server: ServerConfig,
    database_url: String,
    database: DatabaseSection,
}

impl ServeSettings {
    fn resolve(args: ServeArgs, config: &ShowbookConfig) -> Result<Self> {
        let mut database = config.database.clone();
        if let Some(max_connections) = args.max_connections {
            anyhow::ensure!(max_connections > 0, "--max-connections must be at least 1");
            database.max_connections = max_connections;
        }

        Ok(Self {
            server: ServerConfig {
                bind_addr: args.bind.unwrap_or(config.server.bind),
                cors_permissive: args.cors_permissive || config.server.cors_permissive,
            },
            database_url: super::database_url(args.database_url, config)?,
            database,
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &ShowbookConfig) -> Result<()> {
    let settings = ServeSettings::resolve(args, config)?;

    tracing::info!("Starting showbook server on {}", settings.server.bind_addr);

    let pool = connect(&settings.database_url, &settings.database)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to bootstrap database schema")?;

    run_server(pool, settings.server)
        .await
        .context("Server error")?;

    Ok(())
}
