/// Structured error types for showbook-core.
///
/// Library consumers get composable `thiserror` errors; the `showbook`
/// binary wraps them in `anyhow` with context.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for showbook-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for [`crate::ShowbookConfig`]
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A config value is present but unusable
    #[error("Invalid config value for '{key}': {reason}")]
    ConfigValue { key: String, reason: String },

    /// Timestamp string in none of the accepted layouts
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Genre entry rejected
    #[error("Invalid genre '{value}': {reason}")]
    InvalidGenre { value: String, reason: String },
}

/// Result type alias for showbook-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an invalid timestamp error
    pub fn invalid_timestamp(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid genre error
    pub fn invalid_genre(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGenre {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_timestamp("tomorrow", "unrecognised layout");
        assert_eq!(
            err.to_string(),
            "Invalid timestamp 'tomorrow': unrecognised layout"
        );

        let err = CoreError::config_value("server.bind", "not a socket address");
        assert!(err.to_string().contains("server.bind"));
    }

    #[test]
    fn test_config_read_mentions_path() {
        let err = CoreError::ConfigRead {
            path: PathBuf::from("/tmp/showbook.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/showbook.toml"));
    }
}
