// SPDX-License-Identifier: MPL-2.0
//! Loading and saving the `settings.toml` configuration file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Log filter
//! - `[catalog]` - Optional directory replacing the bundled catalog
//! - `[storage]` - Optional directory for the preference store
//!
//! # Path Resolution
//!
//! 1. `load_from_path()`/`save_to_path()` with an explicit path
//! 2. `--config-dir` CLI flag or `BOURBON_CONFIG_DIR` environment variable
//! 3. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use bourbon_i18n::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.log_filter = Some("debug".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::i18n::Catalog;
use crate::paths;
use crate::storage::{FileStore, PreferenceStore, UnavailableStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Section Structs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` filter directive (e.g. "info", "bourbon_i18n=debug").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Directory of `<locale>.toml` files used instead of the bundled catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the preference store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Log filter from the config, or [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.general
            .log_filter
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Loads the configured catalog directory, or the bundled catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let catalog = match &self.catalog.dir {
            Some(dir) => Catalog::load_dir(dir)?,
            None => Catalog::bundled()?,
        };
        Ok(catalog)
    }

    /// Opens the preference store.
    ///
    /// Falls back to a store that rejects every operation when no data
    /// directory can be resolved, so sessions keep working in memory.
    #[must_use]
    pub fn preference_store(&self) -> Box<dyn PreferenceStore> {
        match FileStore::open_with_override(self.storage.data_dir.clone()) {
            Some(store) => Box::new(store),
            None => {
                warn!("no data directory available, preferences will not persist");
                Box::new(UnavailableStore)
            }
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {error}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
