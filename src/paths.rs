// SPDX-License-Identifier: MPL-2.0
//! Application directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`BOURBON_DATA_DIR`, `BOURBON_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs`, with [`APP_NAME`] appended

use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

/// Application name used for directory naming.
pub const APP_NAME: &str = "BourbonWeb";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "BOURBON_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "BOURBON_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` flags.
///
/// Only the first call takes effect.
pub fn init_cli_overrides(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) {
    if !record_overrides(&CLI_DATA_DIR, &CLI_CONFIG_DIR, data_dir, config_dir) {
        debug!("CLI directory overrides already initialized");
    }
}

/// Sets both cells independently. Returns `false` if either was already set.
fn record_overrides(
    data_cell: &OnceLock<Option<PathBuf>>,
    config_cell: &OnceLock<Option<PathBuf>>,
    data_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> bool {
    let data_set = data_cell.set(data_dir).is_ok();
    let config_set = config_cell.set(config_dir).is_ok();
    data_set && config_set
}

/// Returns the application data directory (preference store).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        CLI_DATA_DIR.get().cloned().flatten(),
        std::env::var(ENV_DATA_DIR).ok(),
        dirs::data_dir,
    )
}

/// Returns the application config directory (`settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        CLI_CONFIG_DIR.get().cloned().flatten(),
        std::env::var(ENV_CONFIG_DIR).ok(),
        dirs::config_dir,
    )
}

/// Picks the first tier that yields a path. An empty env value counts as unset.
fn resolve(
    override_path: Option<PathBuf>,
    cli_path: Option<PathBuf>,
    env_value: Option<String>,
    platform: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or(cli_path)
        .or_else(|| env_value.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(|| {
            platform().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}
