use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Environment variable that points at an alternate config file
pub const CONFIG_PATH_ENV: &str = "SHOWBOOK_CONFIG";

/// Commented starting point written by `showbook config init`
pub const CONFIG_TEMPLATE: &str = r#"# showbook configuration
#
# Command-line flags and environment variables (DATABASE_URL, SHOWBOOK_BIND)
# take precedence over the values below.

[server]
bind = "127.0.0.1:5000"
# Allow every origin instead of localhost only
cors_permissive = false

[database]
# url = "postgres://localhost/showbook"
max_connections = 5
# Seconds to wait for a free pooled connection
acquire_timeout_secs = 10

[logging]
# Any tracing EnvFilter directive, e.g. "showbook_server=debug,info"
# level = "info"
"#;

/// Configuration for the showbook server and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowbookConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
}

impl ShowbookConfig {
    /// Config file path: `$SHOWBOOK_CONFIG`, else `~/.showbook/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".showbook/config.toml")
    }

    /// Load from [`Self::config_path`]. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(CoreError::config_value(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        if self.database.acquire_timeout_secs == 0 {
            return Err(CoreError::config_value(
                "database.acquire_timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some(url) = &self.database.url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(CoreError::config_value(
                    "database.url",
                    "expected a postgres:// connection string",
                ));
            }
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShowbookConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ShowbookConfig::default());
        assert_eq!(config.server.bind.port(), 5000);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/showbook\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = ShowbookConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/showbook")
        );
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_secs, 10);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(!config.server.cors_permissive);
    }

    #[test]
    fn template_parses() {
        let config: ShowbookConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, ShowbookConfig::default());
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();

        let err = ShowbookConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn rejects_zero_connections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        let err = ShowbookConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::ConfigValue { .. }));
    }

    #[test]
    fn rejects_zero_acquire_timeout() {
        let mut config = ShowbookConfig::default();
        config.database.acquire_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database.acquire_timeout_secs"));
    }

    #[test]
    fn rejects_non_postgres_url() {
        let mut config = ShowbookConfig::default();
        config.database.url = Some("mysql://localhost/showbook".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = ShowbookConfig::default();
        config.server.cors_permissive = true;
        let rendered = config.to_toml().unwrap();
        let parsed: ShowbookConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
