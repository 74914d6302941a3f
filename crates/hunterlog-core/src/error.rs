//! Core error types for hunterlog-core.
//!
//! This module defines the error hierarchy using thiserror. The engine is
//! never fatal to the host: storage failures degrade to last-known state
//! and are surfaced as `StoreError`, while malformed metric counts are
//! programmer errors surfaced as `MetricError`.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for hunterlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed metric counts
    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    /// Key-value persistence failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No habit registered under the given id
    #[error("Unknown habit: {0}")]
    UnknownHabit(Uuid),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors for malformed daily metric records.
///
/// These indicate a bug in the caller: the completion tracker's own writes
/// never produce them.
#[derive(Error, Debug)]
pub enum MetricError {
    /// Completed count exceeds total count
    #[error("Invalid counts for {date}: completed ({completed}) exceeds total ({total})")]
    InvalidCounts {
        date: NaiveDate,
        total: u32,
        completed: u32,
    },

    /// Per-domain completed count exceeds the domain total
    #[error("Invalid counts for {date} in domain '{domain}': completed ({completed}) exceeds total ({total})")]
    InvalidDomainCounts {
        date: NaiveDate,
        domain: String,
        total: u32,
        completed: u32,
    },
}

/// Errors from the key-value persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The store could not serve a read or write
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A record could not be serialized for storage
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value for a field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
