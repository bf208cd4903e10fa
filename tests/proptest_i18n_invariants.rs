// SPDX-License-Identifier: MPL-2.0
//! Property-based invariant tests for the catalog and translation session.
//!
//! 1. Registered entries are returned verbatim
//! 2. Absent entries resolve to the key itself
//! 3. Unloaded sessions return the key for any input
//! 4. Any persisted locale survives a remount
//! 5. Arbitrary stored strings never move a session off a supported locale
//! 6. Re-spelled tags (case, separator) are treated as absent
//! 7. Coverage percentages stay in [0, 100]

use bourbon_i18n::config::LANGUAGE_STORAGE_KEY;
use bourbon_i18n::i18n::{Catalog, Locale, Session};
use bourbon_i18n::storage::MemoryStore;
use proptest::prelude::*;

fn any_locale() -> impl Strategy<Value = Locale> {
    prop::sample::select(Locale::ALL.to_vec())
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}([./][a-z]{1,8}){0,3}"
}

proptest! {
    #[test]
    fn registered_entries_are_returned(
        locale in any_locale(),
        key in key_strategy(),
        value in ".{0,40}",
    ) {
        let mut catalog = Catalog::new();
        catalog.insert(locale, key.clone(), value.clone());
        prop_assert_eq!(catalog.lookup(locale, &key), value.as_str());
    }

    #[test]
    fn absent_entries_resolve_to_key(
        locale in any_locale(),
        other in any_locale(),
        key in key_strategy(),
        probe in key_strategy(),
    ) {
        let mut catalog = Catalog::new();
        catalog.insert(locale, key.clone(), "value");

        prop_assume!(other != locale || probe != key);
        prop_assert_eq!(catalog.lookup(other, &probe), probe.as_str());
    }

    #[test]
    fn unloaded_session_returns_key(key in ".{0,40}") {
        let catalog = Catalog::bundled().expect("bundled catalog should parse");
        let session = Session::mount(&catalog, MemoryStore::new());
        prop_assert_eq!(session.translate(&key), key.as_str());
    }

    #[test]
    fn persisted_locale_survives_remount(locale in any_locale()) {
        let catalog = Catalog::new();
        let mut session = Session::mount_restored(&catalog, MemoryStore::new());
        session.set_locale(locale);

        let remounted = Session::mount_restored(&catalog, session.into_store());
        prop_assert_eq!(remounted.current_locale(), locale);
    }

    #[test]
    fn arbitrary_stored_values_are_safe(raw in ".{0,20}") {
        let catalog = Catalog::new();
        let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, &raw);
        let session = Session::mount_restored(&catalog, store);

        prop_assert!(session.is_loaded());
        let expected = Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == raw)
            .unwrap_or(Locale::EsAr);
        prop_assert_eq!(session.current_locale(), expected);
    }

    #[test]
    fn respelled_tags_are_not_adopted(
        locale in any_locale(),
        lower in any::<bool>(),
        underscore in any::<bool>(),
    ) {
        prop_assume!(lower || underscore);
        let mut raw = locale.as_str().to_string();
        if lower {
            raw = raw.to_lowercase();
        }
        if underscore {
            raw = raw.replace('-', "_");
        }

        let catalog = Catalog::new();
        let store = MemoryStore::with_value(LANGUAGE_STORAGE_KEY, &raw);
        let session = Session::mount_restored(&catalog, store);
        prop_assert_eq!(session.current_locale(), Locale::EsAr);
    }

    #[test]
    fn coverage_percent_bounded(
        entries in prop::collection::vec((any_locale(), key_strategy()), 0..30),
    ) {
        let mut catalog = Catalog::new();
        for (locale, key) in entries {
            catalog.insert(locale, key, "x");
        }

        let report = catalog.coverage();
        for coverage in &report.locales {
            let pct = coverage.coverage_percent();
            prop_assert!((0.0..=100.0).contains(&pct));
            prop_assert_eq!(coverage.present + coverage.missing.len(), report.total_keys);
        }
    }
}
