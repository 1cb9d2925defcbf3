// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides temp-dir server resources, session tokens, fixture files and a recording notifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `coachbook`

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coachbook::config::environment::ServerConfig;
use coachbook::context::ServerResources;
use coachbook::errors::{AppError, AppResult};
use coachbook::logging::init_test_logging;
use coachbook::models::{Identity, WorkoutStage};
use coachbook::notifications::{Notification, NotificationSender};
use tempfile::TempDir;

pub const COACH_PASSWORD: &str = "test-coach-password";

/// Finished-record style CSV with the interpreted columns and one opaque column
pub const SQUAT_BENCH_CSV: &str = "Exercise,Planned Reps,Actual Reps,Actual Weight (lb),Notes\n\
Squat,5,5,200,\n\
Squat,5,5,210,top set\n\
Bench Press,8,8,135,\n";

/// Notifier that keeps every notification it is asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        self.sent.lock().unwrap().push(notification);
        if self.fail {
            Err(AppError::internal("mail relay unavailable"))
        } else {
            Ok(())
        }
    }
}

/// Server resources over a fresh temporary data directory
pub struct TestEnv {
    pub dir: TempDir,
    pub resources: Arc<ServerResources>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestEnv {
    pub fn stage_path(&self, stage: WorkoutStage, name: &str) -> PathBuf {
        self.resources.store.path_of(stage, name)
    }

    /// Write a fixture file straight into a store directory
    pub fn put(&self, stage: WorkoutStage, name: &str, content: &str) {
        let path = self.stage_path(stage, name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn exists(&self, stage: WorkoutStage, name: &str) -> bool {
        self.stage_path(stage, name).exists()
    }

    /// Write the athlete contacts CSV
    pub fn put_contacts(&self, content: &str) {
        let path = self.resources.config.contacts_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// `Bearer` header value for `identity`
    pub fn bearer(&self, identity: &Identity) -> String {
        let session = self.resources.sessions.issue(identity).unwrap();
        format!("Bearer {}", session.token)
    }

    pub fn coach_bearer(&self) -> String {
        self.bearer(&Identity::coach("coach"))
    }

    pub fn athlete_bearer(&self, name: &str) -> String {
        self.bearer(&Identity::athlete(name))
    }
}

pub async fn create_test_env_with(notifier: RecordingNotifier) -> TestEnv {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::new(dir.path(), COACH_PASSWORD);
    let notifier = Arc::new(notifier);
    let resources = Arc::new(ServerResources::with_notifier(
        config,
        Arc::clone(&notifier) as Arc<dyn NotificationSender>,
    ));
    resources.prepare().await.unwrap();
    TestEnv {
        dir,
        resources,
        notifier,
    }
}

pub async fn create_test_env() -> TestEnv {
    create_test_env_with(RecordingNotifier::default()).await
}
