use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Upstream feed could not be fetched or understood. The cycle is skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feed returned HTTP {0}")]
    Status(StatusCode),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Relay rejected message (HTTP {status}): {}", .errors.join("; "))]
    Rejected { status: StatusCode, errors: Vec<String> },
}

/// Startup configuration problems. These are the only fatal errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in .env")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
