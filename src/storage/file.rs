// SPDX-License-Identifier: MPL-2.0
//! Preference store persisted as a CBOR map.
//!
//! The file holds a single `string → string` map and is re-read on every
//! access, so two stores pointed at the same directory observe each other's
//! writes. Writes are read-modify-write of the whole map.
//!
//! # Path Resolution
//!
//! 1. `FileStore::at()` with an explicit directory
//! 2. `BOURBON_DATA_DIR` environment variable (via [`paths`])
//! 3. Platform-specific data directory

use super::PreferenceStore;
use crate::config::defaults::PREFERENCES_FILE;
use crate::error::StorageError;
use crate::paths;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Why the preferences file could not be loaded.
enum LoadError {
    /// The file exists but could not be read.
    Io(io::Error),
    /// The file was read but is not a CBOR string map.
    Corrupt(String),
}

impl LoadError {
    fn into_storage(self) -> StorageError {
        match self {
            LoadError::Io(err) => StorageError::Read(err.to_string()),
            LoadError::Corrupt(reason) => StorageError::Read(reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens the store in the default application data directory.
    ///
    /// Returns `None` when no data directory can be determined.
    #[must_use]
    pub fn open_default() -> Option<Self> {
        Self::open_with_override(None)
    }

    /// Opens the store in `base_dir`, or the default data directory.
    #[must_use]
    pub fn open_with_override(base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(base_dir).map(|dir| Self::at(&dir))
    }

    /// Opens the store inside `dir`. The directory is created on first write.
    #[must_use]
    pub fn at(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFERENCES_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>, LoadError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = fs::File::open(&self.path).map_err(LoadError::Io)?;
        ciborium::from_reader(BufReader::new(file)).map_err(|err| match err {
            // A truncated file surfaces as an early EOF from the reader.
            ciborium::de::Error::Io(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => {
                LoadError::Corrupt(io_err.to_string())
            }
            ciborium::de::Error::Io(io_err) => LoadError::Io(io_err),
            other => LoadError::Corrupt(other.to_string()),
        })
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }
        let file = fs::File::create(&self.path).map_err(|e| StorageError::Write(e.to_string()))?;
        ciborium::into_writer(map, BufWriter::new(file))
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut map = self.load_map().map_err(LoadError::into_storage)?;
        Ok(map.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Only a corrupt file is replaced; an unreadable one is left alone.
        let mut map = match self.load_map() {
            Ok(map) => map,
            Err(LoadError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "replacing corrupt preferences file");
                BTreeMap::new()
            }
            Err(err) => return Err(err.into_storage()),
        };
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)
    }
}
