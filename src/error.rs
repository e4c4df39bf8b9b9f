//! Error types for the ALP harness

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration field `{field}`: {constraint} (got {value})")]
    Validation {
        field: String,
        constraint: String,
        value: String,
    },

    #[error("configuration must be a JSON object or a validated AlpConfig, got {0}")]
    ConfigType(String),

    #[error("failed to create log directory {path}: {source}")]
    Initialization {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write termination record {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
