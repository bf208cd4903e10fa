// SPDX-License-Identifier: MPL-2.0
//! `bourbon_i18n` is the localization layer of Bourbon Web.
//!
//! It provides the static translation catalog, the per-view translation
//! session with its persisted locale preference, and the theme preference
//! context shared by the dashboard views.

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod theme;
