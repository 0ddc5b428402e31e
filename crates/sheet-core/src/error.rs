//! Error types for sheet-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheet-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write an export file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sheet document could not be understood
    #[error("invalid sheet document '{path}': {message}")]
    InvalidDocument { path: PathBuf, message: String },

    /// A cell does not hold a value of its column's declared type
    #[error("sheet '{sheet}', row {key}, column {column}: expected {expected}, found {found}")]
    ValueType {
        sheet: String,
        key: i32,
        column: u32,
        expected: String,
        found: String,
    },

    /// No sheet with the requested name
    #[error("sheet not found: '{0}'")]
    SheetNotFound(String),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
