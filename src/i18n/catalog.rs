// SPDX-License-Identifier: MPL-2.0
//! Static (locale, key) → string table.
//!
//! Catalog files are TOML, one per locale, named after the locale tag
//! (`es-AR.toml`). Nested tables flatten into dotted keys, so
//!
//! ```toml
//! [connect]
//! title = "Conectá tu hotel"
//! ```
//!
//! registers `connect.title`. Quoted keys (`"dashboard/home" = "…"`) are kept
//! as written, which is how slash-namespaced keys are authored.
//!
//! Lookups never fail: a missing entry resolves to the key itself, which
//! shows up in the UI as a visible marker of an untranslated string.

use super::locale::Locale;
use crate::error::CatalogError;
use rust_embed::RustEmbed;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const CATALOG_EXTENSION: &str = "toml";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Locale, HashMap<String, String>>,
}

impl Catalog {
    /// Creates an empty catalog. Every lookup on it returns the key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the catalog embedded at build time from `assets/i18n/`.
    pub fn bundled() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(tag) = filename.strip_suffix(".toml") else {
                continue;
            };
            let locale =
                Locale::parse(tag).ok_or_else(|| CatalogError::UnknownLocale(tag.to_string()))?;
            if let Some(content) = Asset::get(filename) {
                let text = String::from_utf8_lossy(content.data.as_ref());
                catalog.merge_toml(locale, &text)?;
            }
        }
        Ok(catalog)
    }

    /// Builds a single-locale catalog from TOML text.
    pub fn from_toml(locale: Locale, text: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.merge_toml(locale, text)?;
        Ok(catalog)
    }

    /// Loads every `<locale>.toml` file in `dir`.
    ///
    /// Files with other extensions are skipped; a `.toml` file named after a
    /// locale outside the supported set is an error.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read_err = |source| CatalogError::Read {
            path: dir.display().to_string(),
            source,
        };

        let mut catalog = Self::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CATALOG_EXTENSION) {
                continue;
            }
            let tag = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let locale =
                Locale::parse(tag).ok_or_else(|| CatalogError::UnknownLocale(tag.to_string()))?;
            let text = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.display().to_string(),
                source,
            })?;
            catalog.merge_toml(locale, &text)?;
        }
        Ok(catalog)
    }

    /// Parses `text` and adds its entries for `locale`, overwriting existing
    /// keys.
    pub fn merge_toml(&mut self, locale: Locale, text: &str) -> Result<(), CatalogError> {
        let table = toml::from_str::<toml::Table>(text).map_err(|e| CatalogError::Parse {
            locale: locale.to_string(),
            message: e.to_string(),
        })?;
        let strings = self.entries.entry(locale).or_default();
        flatten(locale, "", &table, strings)
    }

    /// Registers a single entry.
    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Returns the registered string, or `None` when absent.
    #[must_use]
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.entries
            .get(&locale)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    /// Returns the registered string, or `key` unchanged when absent.
    #[must_use]
    pub fn lookup<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or(key)
    }

    /// Number of entries registered for `locale`.
    #[must_use]
    pub fn len(&self, locale: Locale) -> usize {
        self.entries.get(&locale).map_or(0, HashMap::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Reports, for each supported locale, which keys known to any other
    /// locale are missing.
    #[must_use]
    pub fn coverage(&self) -> CoverageReport {
        let all_keys: BTreeSet<&str> = self
            .entries
            .values()
            .flat_map(|strings| strings.keys().map(String::as_str))
            .collect();

        let locales = Locale::ALL
            .into_iter()
            .map(|locale| {
                let strings = self.entries.get(&locale);
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| strings.is_none_or(|s| !s.contains_key(**key)))
                    .map(|key| (*key).to_string())
                    .collect();
                LocaleCoverage {
                    locale,
                    present: all_keys.len() - missing.len(),
                    missing,
                }
            })
            .collect();

        CoverageReport {
            total_keys: all_keys.len(),
            locales,
        }
    }
}

fn flatten(
    locale: Locale,
    prefix: &str,
    table: &toml::Table,
    out: &mut HashMap<String, String>,
) -> Result<(), CatalogError> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::String(text) => {
                out.insert(key, text.clone());
            }
            toml::Value::Table(nested) => flatten(locale, &key, nested, out)?,
            _ => {
                return Err(CatalogError::InvalidValue {
                    locale: locale.to_string(),
                    key,
                })
            }
        }
    }
    Ok(())
}

/// Result of [`Catalog::coverage`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Size of the union of keys across all locales.
    pub total_keys: usize,
    /// One entry per supported locale, in [`Locale::ALL`] order.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// True when every locale carries every key.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(|c| c.missing.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: Locale,
    pub present: usize,
    /// Missing keys, sorted.
    pub missing: Vec<String>,
}

impl LocaleCoverage {
    /// Share of known keys this locale carries, in `[0, 100]`.
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        let total = self.present + self.missing.len();
        if total == 0 {
            100.0
        } else {
            self.present as f64 / total as f64 * 100.0
        }
    }
}
