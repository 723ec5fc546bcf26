//! Error types.

use std::path::PathBuf;

/// Errors raised while loading or validating a [`ThresholdConfig`].
///
/// [`ThresholdConfig`]: crate::config::ThresholdConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised inside a single sanity rule group.
///
/// These never leave the checker; each one is turned into a diagnostic warning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    #[error("threshold {name} must be positive, got {value}")]
    InvalidThreshold { name: &'static str, value: String },

    #[error("failed to build keyword matcher: {0}")]
    Keywords(#[from] aho_corasick::BuildError),

    #[error("failed to compile pattern for {name}: {reason}")]
    Pattern { name: String, reason: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
