//! Persistence: flat key-value storage of JSON snapshots.
//!
//! Each store serializes its whole state under one key. Writes are
//! fire-and-forget from the caller's point of view: [`save_snapshot`] logs a
//! failure and returns, so a mutating operation never fails because storage
//! is unavailable.

mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{Config, ContentConfig, LoggingConfig, ProfileDefaults};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::Result;

/// Storage keys for each persisted snapshot.
pub mod keys {
    pub const DISCIPLINES: &str = "disciplines";
    pub const HISTORY: &str = "history";
    pub const JOURNAL: &str = "journal";
    pub const LEARNING: &str = "learning";
    pub const SUBSCRIPTION: &str = "subscription";
    pub const PROFILE: &str = "profile";
    pub const ACTIVITY: &str = "activity";
    pub const INSIGHTS: &str = "insights";
}

/// Key-value persistence collaborator.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Load and decode the snapshot under `key`.
///
/// Missing, unreadable or undecodable snapshots yield `None`; the latter two
/// are logged.
pub fn load_snapshot<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read snapshot");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding undecodable snapshot");
            None
        }
    }
}

/// Encode and write a snapshot, logging instead of propagating failures.
pub fn save_snapshot<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode snapshot");
            return;
        }
    };
    if let Err(e) = store.save(key, &encoded) {
        tracing::warn!(key, error = %e, "failed to persist snapshot");
    } else {
        tracing::trace!(key, bytes = encoded.len(), "snapshot saved");
    }
}

/// Returns `~/.config/steadfast[-dev]/` based on STEADFAST_ENV.
///
/// Set STEADFAST_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STEADFAST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("steadfast-dev")
    } else {
        base_dir.join("steadfast")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
