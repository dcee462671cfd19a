//! Core error types for habitgrid-core.
//!
//! This module defines the error hierarchy using thiserror, split by the
//! surface the error comes from: the persistence backend, the config file,
//! or input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence backend errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the key-value persistence backend.
///
/// Read errors mean a stored payload could not be fetched or parsed; the
/// engine recovers by falling back to an empty collection. Write errors are
/// collected by the engine so a failed flush never blocks an in-memory
/// mutation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be read or decoded
    #[error("Failed to read '{key}' from store: {reason}")]
    ReadFailed { key: String, reason: String },

    /// A value could not be written back
    #[error("Failed to write '{key}' to store: {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown enum label coming from user input
    #[error("Unknown {what}: '{value}'")]
    UnknownLabel { what: &'static str, value: String },
}

impl StoreError {
    /// Read error with the offending key attached.
    pub fn read(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::ReadFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Write error with the offending key attached.
    pub fn write(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::WriteFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
