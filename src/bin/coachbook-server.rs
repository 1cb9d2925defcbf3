// ABOUTME: Coachbook HTTP server binary
// ABOUTME: Loads environment configuration, prepares the data directory and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # Coachbook server
//!
//! ```bash
//! COACH_PASSWORD=... COACHBOOK_DATA_DIR=./data cargo run --bin coachbook-server
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use coachbook::config::environment::ServerConfig;
use coachbook::constants::service::{SERVICE_NAME, SERVICE_VERSION};
use coachbook::context::ServerResources;
use coachbook::logging::init_logging;
use coachbook::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!(
        service = SERVICE_NAME,
        version = SERVICE_VERSION,
        data_dir = %config.data_dir.display(),
        bind = %config.bind_addr(),
        "starting"
    );

    let resources = Arc::new(ServerResources::new(config));
    resources
        .prepare()
        .await
        .context("Failed to prepare data directories")?;

    serve(resources).await.context("Server failed")?;
    Ok(())
}
