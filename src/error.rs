// SPDX-License-Identifier: MPL-2.0
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Usage(String),
}

/// Errors raised while building a catalog from external sources.
///
/// Lookups never produce these; they only surface when catalog files are
/// loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file name does not name a supported locale (e.g. `fr-FR.toml`).
    #[error("unsupported catalog locale: {0}")]
    UnknownLocale(String),

    /// The catalog source is not valid TOML.
    #[error("failed to parse catalog for {locale}: {message}")]
    Parse { locale: String, message: String },

    /// A leaf value is not a string.
    #[error("catalog entry {key} for {locale} must be a string")]
    InvalidValue { locale: String, key: String },

    #[error("failed to read catalog file {path}: {source}")]
    Read { path: String, source: io::Error },
}

/// Errors raised by a [`PreferenceStore`](crate::storage::PreferenceStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or there is no storage backend in this context.
    #[error("preference storage is unavailable")]
    Unavailable,

    #[error("failed to read preferences: {0}")]
    Read(String),

    #[error("failed to write preferences: {0}")]
    Write(String),
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err: Error = io::Error::other("disk failure").into();
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn catalog_error_wraps_into_error() {
        let err: Error = CatalogError::UnknownLocale("fr-FR".into()).into();
        match err {
            Error::Catalog(CatalogError::UnknownLocale(tag)) => assert_eq!(tag, "fr-FR"),
            _ => panic!("expected Catalog variant"),
        }
    }

    #[test]
    fn storage_unavailable_display() {
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "preference storage is unavailable"
        );
    }

    #[test]
    fn toml_error_becomes_config_error() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
