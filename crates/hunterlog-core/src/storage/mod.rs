//! Persistence layer: the opaque key-value collaborator and configuration.

pub mod config;
pub mod database;

pub use config::EngineConfig;
pub use database::{Database, MemoryStore};

use std::path::PathBuf;

use crate::error::StoreError;

/// The opaque key-value collaborator the engine persists through.
///
/// Values are serialized JSON records. Implementations must treat reads of
/// missing keys as `Ok(None)`, never as errors.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Write several entries atomically: either every entry becomes
    /// durable or none do.
    fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// Returns `~/.config/hunterlog[-dev]/` based on HUNTERLOG_ENV.
///
/// Set HUNTERLOG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HUNTERLOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("hunterlog-dev")
    } else {
        base_dir.join("hunterlog")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
