// SPDX-License-Identifier: MPL-2.0
//! Per-view translation state.
//!
//! A [`Session`] starts [`LoadState::Unloaded`] and returns raw keys so the
//! first render matches the server-rendered markup. [`Session::restore`] reads
//! the persisted locale once and moves the session to [`LoadState::Loaded`],
//! after which lookups go through the catalog.

use super::catalog::Catalog;
use super::locale::Locale;
use crate::config::defaults::LANGUAGE_STORAGE_KEY;
use crate::storage::PreferenceStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Mounted, persisted preference not read yet.
    Unloaded,
    /// Preference read (or found absent). Terminal.
    Loaded,
}

pub struct Session<'c, S: PreferenceStore> {
    catalog: &'c Catalog,
    store: S,
    locale: Locale,
    state: LoadState,
}

impl<'c, S: PreferenceStore> Session<'c, S> {
    /// Mounts a session with the default locale, not yet restored.
    pub fn mount(catalog: &'c Catalog, store: S) -> Self {
        Self {
            catalog,
            store,
            locale: Locale::default(),
            state: LoadState::Unloaded,
        }
    }

    /// Mounts a session and immediately runs the restore step.
    pub fn mount_restored(catalog: &'c Catalog, store: S) -> Self {
        let mut session = Self::mount(catalog, store);
        session.restore();
        session
    }

    /// Reads the persisted locale and transitions to `Loaded`.
    ///
    /// Runs at most once; later calls do nothing. Missing, invalid or
    /// unreadable values keep the current locale.
    pub fn restore(&mut self) {
        if self.state == LoadState::Loaded {
            return;
        }

        match self.store.read(LANGUAGE_STORAGE_KEY) {
            Ok(Some(stored)) => match Locale::parse(&stored) {
                Some(locale) => self.locale = locale,
                None => debug!(value = %stored, "ignoring invalid stored locale"),
            },
            Ok(None) => {}
            Err(error) => warn!(%error, "could not read locale preference"),
        }

        self.state = LoadState::Loaded;
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    #[must_use]
    pub fn current_locale(&self) -> Locale {
        self.locale
    }

    /// Alias of [`Session::current_locale`] for view code.
    #[must_use]
    pub fn language(&self) -> Locale {
        self.locale
    }

    /// Returns `key` itself until restored, the catalog string afterwards.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        match self.state {
            LoadState::Unloaded => key,
            LoadState::Loaded => self.catalog.lookup(self.locale, key),
        }
    }

    /// Short form of [`Session::translate`].
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translate(key)
    }

    /// Switches the active locale and persists it.
    ///
    /// A pending restore is completed first so it cannot overwrite this
    /// choice afterwards. The in-memory locale changes even if the write
    /// fails.
    pub fn set_locale(&mut self, locale: Locale) {
        self.restore();
        self.locale = locale;
        if let Err(error) = self.store.write(LANGUAGE_STORAGE_KEY, locale.as_str()) {
            warn!(%error, %locale, "could not persist locale preference");
        }
    }

    /// Selector entry point. Tags outside the supported set are ignored.
    pub fn change_language(&mut self, tag: &str) {
        match Locale::parse(tag) {
            Some(locale) => self.set_locale(locale),
            None => debug!(tag, "ignoring unsupported locale"),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unmounts the session, handing back its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{MemoryStore, UnavailableStore};
    use std::cell::Cell;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(Locale::EsAr, "cta.title", "Hola");
        catalog.insert(Locale::EnUs, "cta.title", "Hello");
        catalog.insert(Locale::PtBr, "cta.title", "Olá");
        catalog
    }

    struct CountingStore {
        inner: MemoryStore,
        reads: Cell<usize>,
    }

    impl PreferenceStore for CountingStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.write(key, value)
        }
    }

    /// Succeeds on read, fails on write.
    struct ReadOnlyStore(MemoryStore);

    impl PreferenceStore for ReadOnlyStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("read-only".into()))
        }
    }

    #[test]
    fn unloaded_session_returns_raw_keys() {
        let catalog = catalog();
        let session = Session::mount(&catalog, MemoryStore::new());
        assert_eq!(session.state(), LoadState::Unloaded);
        assert!(!session.is_loaded());
        assert_eq!(session.translate("cta.title"), "cta.title");
        assert_eq!(session.current_locale(), Locale::EsAr);
    }

    #[test]
    fn restore_without_preference_keeps_default() {
        let catalog = catalog();
        let session = Session::mount_restored(&catalog, MemoryStore::new());
        assert!(session.is_loaded());
        assert_eq!(session.current_locale(), Locale::EsAr);
        assert_eq!(session.t("cta.title"), "Hola");
    }

    #[test]
    fn restore_adopts_stored_locale() {
        let catalog = catalog();
        let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, "pt-BR");
        let session = Session::mount_restored(&catalog, store);
        assert_eq!(session.language(), Locale::PtBr);
        assert_eq!(session.translate("cta.title"), "Olá");
    }

    #[test]
    fn restore_ignores_invalid_stored_value() {
        init_tracing();
        let catalog = catalog();
        let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, "fr-FR");
        let session = Session::mount_restored(&catalog, store);
        assert!(session.is_loaded());
        assert_eq!(session.current_locale(), Locale::EsAr);
    }

    #[test]
    fn restore_ignores_non_canonical_spellings() {
        let catalog = catalog();
        for stored in ["es-ar", "en_US", "EN_us", " pt-BR "] {
            let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, stored);
            let session = Session::mount_restored(&catalog, store);
            assert_eq!(session.current_locale(), Locale::EsAr, "{stored:?} was adopted");
        }
    }

    #[test]
    fn restore_runs_only_once() {
        let catalog = catalog();
        let store = CountingStore {
            inner: MemoryStore::with_value(LANGUAGE_STORAGE_KEY, "en-US"),
            reads: Cell::new(0),
        };
        let mut session = Session::mount(&catalog, store);
        session.restore();
        session.restore();
        session.set_locale(Locale::PtBr);
        session.restore();

        assert_eq!(session.store().reads.get(), 1);
        assert_eq!(session.current_locale(), Locale::PtBr);
    }

    #[test]
    fn set_locale_updates_state_and_storage() {
        let catalog = catalog();
        let mut session = Session::mount_restored(&catalog, MemoryStore::new());
        session.set_locale(Locale::EnUs);
        assert_eq!(session.current_locale(), Locale::EnUs);
        assert_eq!(session.translate("cta.title"), "Hello");
        assert_eq!(session.store().get(LANGUAGE_STORAGE_KEY), Some("en-US"));
    }

    #[test]
    fn change_before_restore_is_not_clobbered() {
        let catalog = catalog();
        let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, "pt-BR");
        let mut session = Session::mount(&catalog, store);

        session.set_locale(Locale::EnUs);
        assert!(session.is_loaded());
        session.restore();

        assert_eq!(session.current_locale(), Locale::EnUs);
        assert_eq!(session.store().get(LANGUAGE_STORAGE_KEY), Some("en-US"));
    }

    #[test]
    fn change_language_ignores_unsupported_tags() {
        init_tracing();
        let catalog = catalog();
        let mut session = Session::mount_restored(&catalog, MemoryStore::new());
        session.change_language("fr-FR");
        assert_eq!(session.current_locale(), Locale::EsAr);
        assert_eq!(session.store().get(LANGUAGE_STORAGE_KEY), None);

        session.change_language("pt-br");
        assert_eq!(session.current_locale(), Locale::EsAr);

        session.change_language("pt-BR");
        assert_eq!(session.current_locale(), Locale::PtBr);
        assert_eq!(session.store().get(LANGUAGE_STORAGE_KEY), Some("pt-BR"));
    }

    #[test]
    fn unavailable_storage_degrades_to_in_memory() {
        init_tracing();
        let catalog = catalog();
        let mut session = Session::mount_restored(&catalog, UnavailableStore);
        assert!(session.is_loaded());
        assert_eq!(session.current_locale(), Locale::EsAr);

        session.set_locale(Locale::EnUs);
        assert_eq!(session.current_locale(), Locale::EnUs);
        assert_eq!(session.translate("cta.title"), "Hello");
    }

    #[test]
    fn failed_write_keeps_in_memory_locale() {
        init_tracing();
        let catalog = catalog();
        let store = ReadOnlyStore(MemoryStore::with_value(LANGUAGE_STORAGE_KEY, "pt-BR"));
        let mut session = Session::mount_restored(&catalog, store);
        assert_eq!(session.current_locale(), Locale::PtBr);

        session.set_locale(Locale::EnUs);
        assert_eq!(session.current_locale(), Locale::EnUs);
        assert_eq!(
            session.store().0.get(LANGUAGE_STORAGE_KEY),
            Some("pt-BR")
        );
    }

    #[test]
    fn missing_key_in_loaded_session_is_raw_key() {
        let catalog = catalog();
        let session = Session::mount_restored(&catalog, MemoryStore::new());
        assert_eq!(session.translate("missing.key"), "missing.key");
    }
}
