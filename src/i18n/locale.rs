// SPDX-License-Identifier: MPL-2.0
//! The closed set of locales Bourbon Web ships translations for.

use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A supported UI locale.
///
/// The set is fixed at compile time. [`Locale::from_str`] only accepts the
/// exact canonical tags; [`Locale::canonicalize`] is the lenient form for
/// human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    /// Spanish (Argentina), the default.
    #[default]
    EsAr,
    /// English (United States).
    EnUs,
    /// Portuguese (Brazil).
    PtBr,
}

/// Returned when a tag does not name a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLocale(pub String);

impl fmt::Display for UnsupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale: {}", self.0)
    }
}

impl std::error::Error for UnsupportedLocale {}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 3] = [Locale::EsAr, Locale::EnUs, Locale::PtBr];

    /// Canonical BCP-47 tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::EsAr => "es-AR",
            Locale::EnUs => "en-US",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Human-readable name in the locale's own language.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::EsAr => "Español (Argentina)",
            Locale::EnUs => "English (US)",
            Locale::PtBr => "Português (Brasil)",
        }
    }

    /// Exact-tag parse, `None` for anything that is not one of
    /// [`Locale::ALL`] spelled canonically.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Locale::ALL.into_iter().find(|locale| locale.as_str() == tag)
    }

    /// Lenient parse for typed input: any casing or separator that
    /// canonicalizes to a supported tag (`es-ar`, `pt_BR`). Bare languages
    /// like `es` are still rejected.
    pub fn canonicalize(tag: &str) -> Result<Self, UnsupportedLocale> {
        let canonical = tag
            .trim()
            .parse::<LanguageIdentifier>()
            .map_err(|_| UnsupportedLocale(tag.to_string()))?
            .to_string();
        Self::parse(&canonical).ok_or_else(|| UnsupportedLocale(tag.to_string()))
    }

    /// The operating system's locale, if it is one we support.
    #[must_use]
    pub fn system() -> Option<Self> {
        sys_locale::get_locale().and_then(|tag| Self::canonicalize(&tag).ok())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
