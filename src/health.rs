// ABOUTME: Server health monitoring for the workout stores and reference data directory
// ABOUTME: Reports overall status, per-component checks and service uptime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Health check reporting

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::config::ServerConfig;
use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};
use crate::models::WorkoutStage;

/// Overall health status
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some systems experiencing issues but service is available
    Degraded,
    /// Critical systems failing, service may be unavailable
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: HealthStatus,
    /// Service information
    pub service: ServiceInfo,
    /// Individual component checks
    pub checks: Vec<ComponentHealth>,
    /// Response timestamp
    pub timestamp: u64,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
}

/// Individual component health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Status description
    pub message: String,
}

/// Health checker for the coachbook server
pub struct HealthChecker {
    start_time: Instant,
    stores: Vec<(&'static str, PathBuf)>,
    reference_dir: PathBuf,
}

impl HealthChecker {
    /// Checker for the directories of `config`
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            start_time: Instant::now(),
            stores: WorkoutStage::ALL
                .into_iter()
                .map(|stage| (stage.directory_name(), config.stage_dir(stage)))
                .collect(),
            reference_dir: config.reference_dir(),
        }
    }

    /// Check every store directory and the reference directory.
    ///
    /// A missing store makes the service unhealthy; a missing reference
    /// directory only degrades it (catalog and contacts read as empty).
    pub async fn check(&self) -> HealthResponse {
        let start = Instant::now();

        let mut checks = Vec::with_capacity(self.stores.len() + 1);
        for (name, dir) in &self.stores {
            checks.push(check_directory(name, dir, HealthStatus::Unhealthy).await);
        }
        checks.push(check_directory("reference_data", &self.reference_dir, HealthStatus::Degraded).await);

        HealthResponse {
            status: overall_status(&checks),
            service: ServiceInfo {
                name: SERVICE_NAME.to_owned(),
                version: SERVICE_VERSION.to_owned(),
                uptime_seconds: self.start_time.elapsed().as_secs(),
            },
            checks,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            response_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

async fn check_directory(name: &str, dir: &Path, when_missing: HealthStatus) -> ComponentHealth {
    let (status, message) = match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => (HealthStatus::Healthy, format!("{} is available", dir.display())),
        Ok(_) => (when_missing, format!("{} is not a directory", dir.display())),
        Err(e) => (when_missing, format!("{} is unavailable: {e}", dir.display())),
    };
    ComponentHealth {
        name: name.to_owned(),
        status,
        message,
    }
}

fn overall_status(checks: &[ComponentHealth]) -> HealthStatus {
    if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}
