// ABOUTME: Filesystem lifecycle store for planned, in-progress and finished workout CSV files
// ABOUTME: Lists, saves, reads, completes and deletes workouts using filename-encoded identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # Workout lifecycle store
//!
//! Three directories hold the lifecycle stages of every workout:
//!
//! - `planned_workouts/`: plans (`{owner}_{...}_{date}.csv`)
//! - `inprogress_workouts/`: tracking copies (`..._tracked.csv`)
//! - `finished_workouts/`: completed records (`..._tracked.csv`)
//!
//! Nothing is cached: every listing re-reads the directories. Writes are
//! plain overwrites, so concurrent writers to one path are last-write-wins.
//!
//! Completing a workout is three independent filesystem steps (write the
//! finished copy, remove the plan, remove the tracking copy) with no
//! rollback. A crash between steps can leave a record both finished and in
//! progress, or leave its plan behind. Within one process, completions of the
//! same workout are serialized so two requests cannot interleave their steps.

/// CSV row extraction
pub mod records;
/// Per-owner store snapshot and derived views
pub mod snapshot;

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{sort_by_name_desc, WorkoutFileName, WorkoutStage};

pub use records::parse_workout_rows;
pub use snapshot::{ActiveListing, MesocycleView, OwnerSnapshot};

/// A finished record offered as a starting point for a new plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Finished filename
    pub filename: String,
    /// Store the template comes from
    #[serde(rename = "type")]
    pub kind: String,
}

/// What a completion actually changed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Identity of the finished record
    pub finished: WorkoutFileName,
    /// Path of the finished record
    pub finished_path: PathBuf,
    /// Whether a plan file was removed
    pub removed_plan: bool,
    /// Whether an in-progress file was removed
    pub removed_in_progress: bool,
}

/// Filesystem-backed workout store
pub struct WorkoutStore {
    root: PathBuf,
    coach_username: String,
    completion_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl WorkoutStore {
    /// Store rooted at `root`; `coach_username` is excluded from athlete listings
    pub fn new(root: impl Into<PathBuf>, coach_username: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            coach_username: coach_username.into(),
            completion_locks: DashMap::new(),
        }
    }

    /// Create the three store directories if missing
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be created
    pub async fn ensure_directories(&self) -> AppResult<()> {
        for stage in WorkoutStage::ALL {
            let dir = self.stage_dir(stage);
            fs::create_dir_all(&dir).await.map_err(|e| {
                AppError::storage(format!("Cannot create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Directory of a stage
    #[must_use]
    pub fn stage_dir(&self, stage: WorkoutStage) -> PathBuf {
        self.root.join(stage.directory_name())
    }

    /// Path of a file inside a stage
    #[must_use]
    pub fn path_of(&self, stage: WorkoutStage, filename: &str) -> PathBuf {
        self.stage_dir(stage).join(filename)
    }

    /// Every workout file in a stage. A missing directory lists as empty.
    ///
    /// # Errors
    ///
    /// `StorageError` when the directory cannot be read
    pub async fn list_stage(&self, stage: WorkoutStage) -> AppResult<Vec<WorkoutFileName>> {
        let dir = self.stage_dir(stage);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Cannot list {}: {e}",
                    dir.display()
                )))
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::storage(format!("Cannot list {}: {e}", dir.display())))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !stage.lists(&name) {
                continue;
            }
            if let Some(file) = WorkoutFileName::parse(&name) {
                files.push(file);
            }
        }
        Ok(files)
    }

    /// Files in a stage owned by `owner` (case-insensitive)
    ///
    /// # Errors
    ///
    /// `StorageError` when the directory cannot be read
    pub async fn list_owned(
        &self,
        stage: WorkoutStage,
        owner: &str,
    ) -> AppResult<Vec<WorkoutFileName>> {
        let mut files = self.list_stage(stage).await?;
        files.retain(|f| f.is_owned_by(owner));
        Ok(files)
    }

    /// List all three stores for one owner in a single pass
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be read
    pub async fn snapshot(&self, owner: &str) -> AppResult<OwnerSnapshot> {
        Ok(OwnerSnapshot {
            owner: owner.to_owned(),
            planned: self.list_owned(WorkoutStage::Planned, owner).await?,
            in_progress: self.list_owned(WorkoutStage::InProgress, owner).await?,
            finished: self.list_owned(WorkoutStage::Finished, owner).await?,
        })
    }

    /// Untracked plans and in-progress files for `owner`
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be read
    pub async fn list_active(&self, owner: &str) -> AppResult<ActiveListing> {
        Ok(self.snapshot(owner).await?.active_listing())
    }

    /// Five latest finished records and six soonest untracked plans for `owner`
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be read
    pub async fn mesocycle_view(&self, owner: &str) -> AppResult<MesocycleView> {
        Ok(self.snapshot(owner).await?.mesocycle_view())
    }

    /// Finished filenames owned by `owner`, ascending
    ///
    /// # Errors
    ///
    /// `StorageError` when the directory cannot be read
    pub async fn list_finished(&self, owner: &str) -> AppResult<Vec<String>> {
        let mut names: Vec<String> = self
            .list_owned(WorkoutStage::Finished, owner)
            .await?
            .into_iter()
            .map(|f| f.raw)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Finished records of `owner`, oldest filename first, with their paths
    ///
    /// # Errors
    ///
    /// `StorageError` when the directory cannot be read
    pub async fn finished_records(
        &self,
        owner: &str,
    ) -> AppResult<Vec<(WorkoutFileName, PathBuf)>> {
        let mut files = self.list_owned(WorkoutStage::Finished, owner).await?;
        files.sort_by(|a, b| a.raw.cmp(&b.raw));
        Ok(files
            .into_iter()
            .map(|f| {
                let path = self.path_of(WorkoutStage::Finished, &f.raw);
                (f, path)
            })
            .collect())
    }

    /// Finished records of `owner` usable as templates, descending by filename
    ///
    /// # Errors
    ///
    /// `StorageError` when the directory cannot be read
    pub async fn list_templates(&self, owner: &str) -> AppResult<Vec<TemplateEntry>> {
        let mut files = self.list_owned(WorkoutStage::Finished, owner).await?;
        sort_by_name_desc(&mut files);
        Ok(files
            .into_iter()
            .map(|f| TemplateEntry {
                filename: f.raw,
                kind: WorkoutStage::Finished.request_kind().to_owned(),
            })
            .collect())
    }

    /// Every athlete that owns a plan or finished record, excluding the coach
    ///
    /// # Errors
    ///
    /// `StorageError` when a directory cannot be read
    pub async fn list_athletes(&self) -> AppResult<Vec<String>> {
        let mut athletes = BTreeSet::new();
        for stage in [WorkoutStage::Planned, WorkoutStage::Finished] {
            for file in self.list_stage(stage).await? {
                if !file.owner.is_empty()
                    && file.owner.to_lowercase() != self.coach_username.to_lowercase()
                {
                    athletes.insert(file.owner);
                }
            }
        }
        Ok(athletes.into_iter().collect())
    }

    /// Write `content` verbatim to `stage/filename`, replacing any existing file
    ///
    /// # Errors
    ///
    /// `InvalidInput` for unsafe or wrongly suffixed names, `StorageError` on write failure
    #[instrument(skip(self, stage, content), fields(stage = %stage, bytes = content.len()))]
    pub async fn save(
        &self,
        stage: WorkoutStage,
        filename: &str,
        content: &str,
    ) -> AppResult<WorkoutFileName> {
        let file = validate_filename(stage, filename)?;
        let path = self.path_of(stage, &file.raw);
        write_file(&path, content).await?;
        info!(owner = %file.owner, filename = %file.raw, "workout saved");
        Ok(file)
    }

    /// Read a workout file
    ///
    /// # Errors
    ///
    /// `InvalidInput` for unsafe names, `ResourceNotFound` when absent,
    /// `StorageError` on read failure
    pub async fn read(&self, stage: WorkoutStage, filename: &str) -> AppResult<String> {
        let file = validate_name(filename)?;
        let path = self.path_of(stage, &file.raw);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::not_found("File")),
            Err(e) => Err(AppError::storage(format!(
                "Cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Move a workout to the finished store.
    ///
    /// Writes `content` to the finished store under `tracked_filename`, then
    /// removes the plan and the in-progress copy if they exist. Absent files
    /// are already-satisfied steps, not errors.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for unsafe or wrongly suffixed names, `StorageError`
    /// when a step fails (earlier steps are not rolled back)
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn complete_workout(
        &self,
        plan_filename: &str,
        tracked_filename: &str,
        content: &str,
    ) -> AppResult<CompletionOutcome> {
        let plan = validate_filename(WorkoutStage::Planned, plan_filename)?;
        let tracked = validate_filename(WorkoutStage::Finished, tracked_filename)?;

        let key = completion_key(&tracked);
        let lock = self
            .completion_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let outcome = {
            let _guard = lock.lock().await;

            let finished_path = self.path_of(WorkoutStage::Finished, &tracked.raw);
            write_file(&finished_path, content).await?;

            let removed_plan =
                remove_if_present(&self.path_of(WorkoutStage::Planned, &plan.raw)).await?;
            let removed_in_progress =
                remove_if_present(&self.path_of(WorkoutStage::InProgress, &tracked.raw)).await?;

            CompletionOutcome {
                finished: tracked,
                finished_path,
                removed_plan,
                removed_in_progress,
            }
        };

        drop(lock);
        self.completion_locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);

        info!(
            owner = %outcome.finished.owner,
            finished = %outcome.finished.raw,
            plan = %plan.raw,
            removed_plan = outcome.removed_plan,
            removed_in_progress = outcome.removed_in_progress,
            "workout completed"
        );
        Ok(outcome)
    }

    /// Remove a plan
    ///
    /// # Errors
    ///
    /// `InvalidInput` for unsafe names, `ResourceNotFound` when the plan does not exist
    pub async fn delete_plan(&self, filename: &str) -> AppResult<()> {
        let file = validate_filename(WorkoutStage::Planned, filename)?;
        let path = self.path_of(WorkoutStage::Planned, &file.raw);
        if remove_if_present(&path).await? {
            info!(owner = %file.owner, filename = %file.raw, "plan deleted");
            Ok(())
        } else {
            Err(AppError::not_found("Plan"))
        }
    }
}

/// Lock key for completions; the base name starts with the owner
fn completion_key(tracked: &WorkoutFileName) -> String {
    tracked.base.to_lowercase()
}

/// Reject names that are not a single plain `.csv` path component
///
/// # Errors
///
/// `InvalidInput` when the name is empty, contains a separator, a quote or
/// a parent reference, or is not a `.csv` file
pub fn validate_name(filename: &str) -> AppResult<WorkoutFileName> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Filename is required"));
    }
    if trimmed != filename
        || filename.contains(['/', '\\', '\0', '"'])
        || filename.starts_with('.')
        || filename.contains("..")
    {
        return Err(AppError::invalid_input(format!(
            "Invalid filename '{filename}'"
        )));
    }
    WorkoutFileName::parse(filename)
        .ok_or_else(|| AppError::invalid_input(format!("'{filename}' is not a .csv file")))
}

/// [`validate_name`] plus the stage's suffix rule (`_tracked.csv` outside the planned store)
///
/// # Errors
///
/// `InvalidInput` when the name is unsafe or does not belong in `stage`
pub fn validate_filename(stage: WorkoutStage, filename: &str) -> AppResult<WorkoutFileName> {
    let file = validate_name(filename)?;
    if !stage.lists(&file.raw) {
        return Err(AppError::invalid_input(format!(
            "'{filename}' does not belong in the {} store",
            stage.request_kind()
        )));
    }
    Ok(file)
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Cannot create {}: {e}", parent.display())))?;
    }
    fs::write(path, content)
        .await
        .map_err(|e| AppError::storage(format!("Cannot write {}: {e}", path.display())))
}

/// Remove a file; `Ok(false)` when it was already gone
async fn remove_if_present(path: &Path) -> AppResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to remove");
            Ok(false)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "remove failed");
            Err(AppError::storage(format!(
                "Cannot remove {}: {e}",
                path.display()
            )))
        }
    }
}
