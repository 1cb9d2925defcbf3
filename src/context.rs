// ABOUTME: Shared server resources handed to every route through axum state
// ABOUTME: Bundles configuration, the workout store, reference data, notifier and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::sync::Arc;

use crate::auth::SessionManager;
use crate::catalog::ExerciseCatalog;
use crate::config::ServerConfig;
use crate::contacts::AthleteDirectory;
use crate::errors::{AppError, AppResult};
use crate::health::HealthChecker;
use crate::notifications::{NotificationSender, TracingNotifier};
use crate::storage::WorkoutStore;

/// Everything a request handler may need
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// Lifecycle store
    pub store: WorkoutStore,
    /// Exercise catalog
    pub catalog: ExerciseCatalog,
    /// Athlete contact lookup
    pub contacts: Arc<AthleteDirectory>,
    /// Completion notification channel
    pub notifier: Arc<dyn NotificationSender>,
    /// Session signing and verification
    pub sessions: SessionManager,
    /// Health reporting
    pub health: HealthChecker,
}

impl ServerResources {
    /// Resources for `config` using the logging notifier
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    /// Resources for `config` delivering notifications through `notifier`
    #[must_use]
    pub fn with_notifier(config: ServerConfig, notifier: Arc<dyn NotificationSender>) -> Self {
        let store = WorkoutStore::new(config.data_dir(), config.auth.coach_username.clone());
        let catalog = ExerciseCatalog::new(config.exercises_path());
        let contacts = Arc::new(AthleteDirectory::new(config.contacts_path()));
        let sessions = SessionManager::from_config(&config.auth);
        let health = HealthChecker::new(&config);
        Self {
            config,
            store,
            catalog,
            contacts,
            notifier,
            sessions,
            health,
        }
    }

    /// Create the store and reference directories
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be created
    pub async fn prepare(&self) -> AppResult<()> {
        self.store.ensure_directories().await?;
        let reference = self.config.reference_dir();
        tokio::fs::create_dir_all(&reference).await.map_err(|e| {
            AppError::storage(format!("Cannot create {}: {e}", reference.display()))
        })
    }
}
