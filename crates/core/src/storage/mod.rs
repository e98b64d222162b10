//! Key/value persistence port shared by the session and name registry.
//!
//! Everything above this module talks to [`Storage`] only; the concrete
//! backend is picked by the composition root.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Device-local JSON file backend.
pub mod file;
/// In-process backend that forgets everything on drop.
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";
/// Key holding the sorted list of user-entered card names.
pub const CARD_NAMES_KEY: &str = "persistent_card_names";

/// Failures surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read or written.
    #[error("storage io failed for {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
    /// Stored contents are not the expected JSON.
    #[error("storage contents are not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-by-key store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete a value. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle used by every consumer of the port.
pub type SharedStorage = Arc<dyn Storage>;

/// Which backend the composition root should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// [`FileStorage`] under the configured data directory.
    File,
    /// [`MemoryStorage`]; nothing survives a restart.
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::File
    }
}
