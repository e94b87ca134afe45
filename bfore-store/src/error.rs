//! Store error types.

use thiserror::Error;

/// Errors from session storage and configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The OS keychain refused an operation.
    #[error("Keychain error: {0}")]
    Keychain(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<keyring::Error> for StoreError {
    fn from(e: keyring::Error) -> Self {
        StoreError::Keychain(e.to_string())
    }
}

/// Errors from writing export files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The format name is not one of `json`, `csv`, `both`.
    #[error("Unknown output format '{0}' (expected json, csv or both)")]
    UnknownFormat(String),

    /// The base filename is empty.
    #[error("Output filename must not be empty")]
    EmptyBaseName,

    /// IO error.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File being written.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
