// SPDX-License-Identifier: MPL-2.0
//! Theme preference context.
//!
//! One [`ThemeContext`] is created at the root of a view tree and handed down
//! by reference. Its lifecycle is explicit:
//!
//! ```text
//! Unmounted --mount--> Mounted(System | Stored(mode)) --activate--> Active(theme)
//!     ^                                                               |
//!     +---------------------------- unmount --------------------------+
//! ```
//!
//! No theme is reported before `Active`, so the first render never depends on
//! client-only state.

use crate::config::defaults::THEME_STORAGE_KEY;
use crate::storage::PreferenceStore;
use std::fmt;
use tracing::{debug, warn};

/// User-selected theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Case-insensitive parse; `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved theme actually applied to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Reports the platform color scheme.
pub trait SchemeDetector {
    /// `None` when the scheme cannot be determined.
    fn detect(&self) -> Option<Theme>;
}

/// Queries the operating system through `dark-light`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemScheme;

impl SchemeDetector for SystemScheme {
    fn detect(&self) -> Option<Theme> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Some(Theme::Light),
            Ok(dark_light::Mode::Dark) => Some(Theme::Dark),
            Ok(dark_light::Mode::Unspecified) => None,
            Err(error) => {
                debug!(?error, "system color scheme detection failed");
                None
            }
        }
    }
}

/// A scheme reported by the host (e.g. a `prefers-color-scheme` query).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportedScheme(pub Option<Theme>);

impl SchemeDetector for ReportedScheme {
    fn detect(&self) -> Option<Theme> {
        self.0
    }
}

/// Where the mounted preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// Nothing valid stored; follow the system.
    System,
    Stored(ThemeMode),
}

impl ThemeSource {
    fn mode(self) -> ThemeMode {
        match self {
            ThemeSource::System => ThemeMode::System,
            ThemeSource::Stored(mode) => mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePhase {
    Unmounted,
    Mounted(ThemeSource),
    Active { mode: ThemeMode, theme: Theme },
}

pub struct ThemeContext<S: PreferenceStore> {
    store: S,
    phase: ThemePhase,
}

impl<S: PreferenceStore> ThemeContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            phase: ThemePhase::Unmounted,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ThemePhase {
        self.phase
    }

    /// Reads the stored preference. Only acts while `Unmounted`.
    pub fn mount(&mut self) {
        if self.phase != ThemePhase::Unmounted {
            return;
        }

        let source = match self.store.read(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => match ThemeMode::parse(&raw) {
                Some(mode) => ThemeSource::Stored(mode),
                None => {
                    debug!(value = %raw, "ignoring invalid stored theme");
                    ThemeSource::System
                }
            },
            Ok(None) => ThemeSource::System,
            Err(error) => {
                warn!(%error, "could not read theme preference");
                ThemeSource::System
            }
        };
        self.phase = ThemePhase::Mounted(source);
    }

    /// Resolves the mounted preference into a theme, mounting first if
    /// needed. Already active contexts are left alone.
    pub fn activate(&mut self, detector: &impl SchemeDetector) {
        self.mount();
        if let ThemePhase::Mounted(source) = self.phase {
            let mode = source.mode();
            self.phase = ThemePhase::Active {
                mode,
                theme: resolve(mode, detector),
            };
        }
    }

    /// Applied theme, `None` until active.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        match self.phase {
            ThemePhase::Active { theme, .. } => Some(theme),
            _ => None,
        }
    }

    /// Selected preference, `None` until active.
    #[must_use]
    pub fn mode(&self) -> Option<ThemeMode> {
        match self.phase {
            ThemePhase::Active { mode, .. } => Some(mode),
            _ => None,
        }
    }

    /// Changes the preference and persists it. Activates first if needed.
    pub fn set_mode(&mut self, mode: ThemeMode, detector: &impl SchemeDetector) {
        self.activate(detector);
        self.phase = ThemePhase::Active {
            mode,
            theme: resolve(mode, detector),
        };
        if let Err(error) = self.store.write(THEME_STORAGE_KEY, mode.as_str()) {
            warn!(%error, %mode, "could not persist theme preference");
        }
    }

    /// Re-resolves after the platform scheme changed. Only affects an active
    /// context following the system.
    pub fn system_changed(&mut self, detector: &impl SchemeDetector) {
        if let ThemePhase::Active {
            mode: ThemeMode::System,
            ..
        } = self.phase
        {
            self.phase = ThemePhase::Active {
                mode: ThemeMode::System,
                theme: resolve(ThemeMode::System, detector),
            };
        }
    }

    /// Tears the context down. The stored preference is kept.
    pub fn unmount(&mut self) {
        self.phase = ThemePhase::Unmounted;
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

// Dark when the system scheme is unknown.
fn resolve(mode: ThemeMode, detector: &impl SchemeDetector) -> Theme {
    match mode {
        ThemeMode::Light => Theme::Light,
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::System => detector.detect().unwrap_or(Theme::Dark),
    }
}
