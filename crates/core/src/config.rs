//! Application configuration.
//!
//! Values are layered: built-in defaults, then
//! `<config_dir>/cardbook/config.toml`, then `CARDBOOK_API_URL` for the API
//! host.

use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use tracing::info;

use crate::storage::{FileStorage, MemoryStorage, SharedStorage, StorageBackend};

/// Directory name under the platform config and data directories.
pub const APP_DIR: &str = "cardbook";
/// Environment variable overriding [`AppConfig::api_base_url`].
pub const API_URL_ENV: &str = "CARDBOOK_API_URL";
/// API host used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const CONFIG_FILE: &str = "config.toml";

/// Settings resolved at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base_url: String,
    /// Where the token, user and card names are kept.
    pub storage_backend: StorageBackend,
    /// Directory for the file storage backend.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load from the default config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path(), env::var(API_URL_ENV).ok())
    }

    /// Load from `path` (which may be missing), with an optional API URL
    /// taking precedence over the file.
    pub fn load_from(path: &Path, api_url_override: Option<String>) -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_base_url", DEFAULT_API_URL)?
            .set_default("storage_backend", "file")?
            .set_default("data_dir", default_data_dir().to_string_lossy().into_owned())?
            .add_source(File::from(path).required(false))
            .set_override_option("api_base_url", api_url_override.filter(|url| !url.is_empty()))?
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Storage backend selected by this configuration.
    pub fn build_storage(&self) -> Result<SharedStorage> {
        let storage: SharedStorage = match self.storage_backend {
            StorageBackend::File => {
                fs::create_dir_all(&self.data_dir).with_context(|| {
                    format!("failed to create data directory {}", self.data_dir.display())
                })?;
                let storage = FileStorage::in_dir(&self.data_dir);
                info!(path = %storage.path().display(), "Using file storage");
                Arc::new(storage)
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Arc::new(MemoryStorage::new())
            }
        };
        Ok(storage)
    }
}

/// `<config_dir>/cardbook/config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// `<data_dir>/cardbook`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Write the default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(&config_path())
}

/// Write the default config to `path` unless something is already there.
pub fn ensure_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, default_config_toml())
        .with_context(|| format!("failed to write default config to {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

fn default_config_toml() -> String {
    format!(
        "# API host; {API_URL_ENV} overrides this.\n\
         api_base_url = \"{DEFAULT_API_URL}\"\n\
         \n\
         # \"file\" keeps the session across runs, \"memory\" forgets it on exit.\n\
         storage_backend = \"file\"\n\
         \n\
         data_dir = {:?}\n",
        default_data_dir().to_string_lossy()
    )
}
