// SPDX-License-Identifier: MPL-2.0
//! Centralized default values and fixed names.
//!
//! # Categories
//!
//! - **Storage**: preference keys and file names
//! - **Logging**: default log filter

// ==========================================================================
// Storage
// ==========================================================================

/// Preference key holding the selected locale tag.
pub const LANGUAGE_STORAGE_KEY: &str = "bourbon_lang";

/// Preference key holding the selected theme mode.
pub const THEME_STORAGE_KEY: &str = "bourbon_theme";

/// Preference file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.cbor";

/// User configuration file inside the config directory.
pub const CONFIG_FILE: &str = "settings.toml";

// ==========================================================================
// Logging
// ==========================================================================

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!LANGUAGE_STORAGE_KEY.is_empty());
    assert!(!THEME_STORAGE_KEY.is_empty());
};
