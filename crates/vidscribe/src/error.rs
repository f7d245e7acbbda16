use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidscribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Errors from report lifecycle operations. The HTTP layer maps these
/// onto status codes, so validation and not-found carry the caller-facing
/// detail in their fields.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Report '{id}' not found")]
    NotFound { id: String },

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, VidscribeError>;
