//! Command implementations for the showbook CLI

pub mod config;
pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use showbook_core::ShowbookConfig;

pub use config::run_config;
pub use migrate::run_migrate;
pub use serve::run_serve;

/// Database URL from the flag/env value, else the config file.
pub(crate) fn database_url(arg: Option<String>, config: &ShowbookConfig) -> Result<String> {
    arg.filter(|url| !url.is_empty())
        .or_else(|| config.database.url.clone())
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, \
             or [database] url in the config file",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_file() {
        let mut config = ShowbookConfig::default();
        config.database.url = Some("postgres://file/showbook".into());

        let url = database_url(Some("postgres://flag/showbook".into()), &config).unwrap();
        assert_eq!(url, "postgres://flag/showbook");

        let url = database_url(None, &config).unwrap();
        assert_eq!(url, "postgres://file/showbook");
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let err = database_url(Some(String::new()), &ShowbookConfig::default()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }
}
