// SPDX-License-Identifier: MPL-2.0
//! `tracing` subscriber setup for the CLI.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this twice is
/// harmless; the second call leaves the first subscriber in place.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
