use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database file to read does not exist.
    #[error("Database file does not exist: {}", .0.display())]
    MissingDatabase(PathBuf),

    /// Generic I/O error (reading a schema file, writing an export).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A query expected exactly one row but found none.
    #[error("Record not found")]
    NotFound,

    /// Schema bootstrap failure.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The seed transaction could not be committed and was rolled back.
    #[error("Commit failed, transaction rolled back: {0}")]
    Commit(rusqlite::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
