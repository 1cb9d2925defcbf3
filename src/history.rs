// ABOUTME: Looks up an athlete's most recent performance of one exercise
// ABOUTME: Used to pre-fill reps and weight when a coach plans the exercise again
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::AppResult;
use crate::models::{sort_by_date, DateOrder, ExerciseSet, WorkoutStage};
use crate::storage::{parse_workout_rows, WorkoutStore};

/// Sets performed in the latest finished workout containing an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHistory {
    /// Date of that workout (`None` when its filename date does not parse)
    pub date: Option<String>,
    /// Every matching row, in file order
    pub sets: Vec<ExerciseSet>,
}

/// Find the latest performance of `exercise` (case-insensitive) by `athlete`.
///
/// Finished files are scanned newest first by filename date; undated files
/// come last. `Ok(None)` means the athlete has never finished this exercise.
///
/// # Errors
///
/// `StorageError` when the finished store cannot be listed
pub async fn latest_exercise_performance(
    store: &WorkoutStore,
    athlete: &str,
    exercise: &str,
) -> AppResult<Option<ExerciseHistory>> {
    let wanted = exercise.trim().to_lowercase();
    let mut files = store.list_owned(WorkoutStage::Finished, athlete).await?;
    sort_by_date(&mut files, DateOrder::Descending);

    for file in files {
        let path = store.path_of(WorkoutStage::Finished, &file.raw);
        let rows = match fs::read_to_string(&path).await {
            Ok(content) => parse_workout_rows(&content),
            Err(e) => {
                warn!(file = %file.raw, error = %e, "could not read finished workout for history");
                continue;
            }
        };
        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => {
                warn!(file = %file.raw, error = %e, "could not parse finished workout for history");
                continue;
            }
        };

        let sets: Vec<ExerciseSet> = rows
            .iter()
            .filter(|row| row.exercise.trim().to_lowercase() == wanted)
            .map(ExerciseSet::from)
            .collect();
        if !sets.is_empty() {
            debug!(file = %file.raw, sets = sets.len(), "exercise history found");
            return Ok(Some(ExerciseHistory {
                date: file.date_string(),
                sets,
            }));
        }
    }
    Ok(None)
}
