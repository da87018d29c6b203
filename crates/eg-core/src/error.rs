//! Error types for eg-core

use chrono::NaiveDateTime;
use thiserror::Error;

/// Main error type for eg-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event {id} ends before it starts ({start} > {end})")]
    InvertedRange {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Duplicate event id: {0}")]
    DuplicateId(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for eg-core
pub type Result<T> = std::result::Result<T, Error>;
