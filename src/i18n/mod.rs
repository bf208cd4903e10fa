// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for Bourbon Web.
//!
//! # Features
//!
//! - Closed set of supported locales ([`Locale`]), `es-AR` by default
//! - Build-time catalog embedded from `assets/i18n/*.toml`
//! - Raw-key fallback for missing entries
//! - Per-view [`Session`] with a hydration-safe loading guard and a persisted
//!   locale preference

pub mod catalog;
pub mod locale;
pub mod session;

pub use catalog::{Catalog, CoverageReport, LocaleCoverage};
pub use locale::{Locale, UnsupportedLocale};
pub use session::{LoadState, Session};
