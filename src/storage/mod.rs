// SPDX-License-Identifier: MPL-2.0
//! Durable key-value storage for user preferences.
//!
//! Sessions only ever see the [`PreferenceStore`] trait. Adapters:
//!
//! - [`MemoryStore`]: in-process map, lost on drop
//! - [`FileStore`]: CBOR file in the application data directory
//! - [`UnavailableStore`]: always fails, standing in for disabled storage
//!
//! Callers are expected to treat every error as "no preference" on read and
//! as a no-op on write.

pub mod file;

pub use file::FileStore;

use crate::error::StorageError;
use std::collections::HashMap;

/// A string-keyed, string-valued preference store.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, `Ok(None)` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
