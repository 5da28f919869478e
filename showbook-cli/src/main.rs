//! showbook CLI - run and administer the venue/artist/show booking service
//!
//! - `serve`: bootstrap the schema and run the HTTP server
//! - `migrate`: bootstrap the schema and exit
//! - `config`: inspect or create `~/.showbook/config.toml`

use anyhow::Result;
use clap::{Parser, Subcommand};
use showbook_core::ShowbookConfig;

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "showbook",
    author,
    version,
    about = "Booking directory for venues, artists and shows",
    long_about = "List venues and artists, book shows between them, and browse what is \
                  coming up. Serves a JSON API backed by PostgreSQL."
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (creates missing tables first)
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
    /// Manage showbook configuration (path, show, init)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        // Works even when the config file does not parse
        Commands::Config(args) => return commands::run_config(args),
        Commands::Serve(args) => {
            let config = start(cli.debug, cli.otel)?;
            commands::run_serve(args, &config).await
        }
        Commands::Migrate(args) => {
            let config = start(cli.debug, cli.otel)?;
            commands::run_migrate(args, &config).await
        }
    };

    tracing_setup::shutdown_otel();
    result
}

/// Load the config file and install the subscriber it configures.
fn start(debug: bool, otel: bool) -> Result<ShowbookConfig> {
    let config = ShowbookConfig::load()?;
    tracing_setup::init(&TracingConfig {
        debug,
        otel,
        level: config.logging.level.clone(),
    })?;
    Ok(config)
}
