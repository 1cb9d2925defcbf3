// ABOUTME: Structured logging setup for the Coachbook server and CLI
// ABOUTME: Installs a tracing subscriber with env filtering and pretty or JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Logging initialization
//!
//! All components log through `tracing`. The subscriber is installed once
//! per process; a second call is a no-op so tests and binaries can both
//! call [`init_logging`] freely.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber.
///
/// `RUST_LOG`-style directives in `config.filter` control verbosity; an
/// unparseable filter falls back to `info`.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = Registry::default().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };

    // Err means a subscriber is already installed
    if result.is_ok() {
        tracing::debug!(format = ?config.format, filter = %config.filter, "logging initialized");
    }
}

/// Logging for tests: warnings only, written through the test writer
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_test_writer()
        .try_init();
}
