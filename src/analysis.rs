// ABOUTME: Per-exercise trend analysis over an athlete's finished workouts
// ABOUTME: Groups rows by exercise and date, computing max weight and total volume per day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # Analysis aggregator
//!
//! Turns finished workout records into a time series per exercise. Every
//! row of a file takes the date encoded in that file's name. Rows are
//! grouped by `(exercise, date)`:
//!
//! - `max_weight` is the heaviest weight lifted that day
//! - `total_volume` is the sum of `reps * weight` over the day's rows
//!
//! Files whose date does not parse, or that cannot be read, are skipped and
//! logged. Exercises with no data have no entry in the result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::AppResult;
use crate::models::{WorkoutFileName, WorkoutRow};
use crate::storage::{parse_workout_rows, WorkoutStore};

/// One day of one exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Workout date
    pub date: NaiveDate,
    /// Heaviest weight that day
    pub max_weight: f64,
    /// Sum of reps × weight that day
    pub total_volume: f64,
}

/// Exercise name to date-ascending trend
pub type ExerciseTrends = BTreeMap<String, Vec<TrendPoint>>;

#[derive(Debug, Clone, Copy)]
struct DayTotals {
    max_weight: f64,
    total_volume: f64,
}

/// Group dated rows into per-exercise trends
pub fn aggregate<I>(records: I) -> ExerciseTrends
where
    I: IntoIterator<Item = (NaiveDate, Vec<WorkoutRow>)>,
{
    let mut groups: BTreeMap<(String, NaiveDate), DayTotals> = BTreeMap::new();
    for (date, rows) in records {
        for row in rows {
            let volume = row.volume();
            groups
                .entry((row.exercise, date))
                .and_modify(|totals| {
                    totals.max_weight = totals.max_weight.max(row.weight);
                    totals.total_volume += volume;
                })
                .or_insert(DayTotals {
                    max_weight: row.weight,
                    total_volume: volume,
                });
        }
    }

    let mut trends = ExerciseTrends::new();
    for ((exercise, date), totals) in groups {
        trends.entry(exercise).or_default().push(TrendPoint {
            date,
            max_weight: totals.max_weight,
            total_volume: totals.total_volume,
        });
    }
    trends
}

async fn load_dated_rows(path: &Path) -> Option<(NaiveDate, Vec<WorkoutRow>)> {
    let name = path.file_name().and_then(|n| n.to_str())?;
    let Some(date) = WorkoutFileName::parse(name).and_then(|f| f.date) else {
        warn!(file = %name, "skipping finished workout without a parseable date");
        return None;
    };

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(file = %name, error = %e, "could not read finished workout");
            return None;
        }
    };

    match parse_workout_rows(&content) {
        Ok(rows) => Some((date, rows)),
        Err(e) => {
            warn!(file = %name, error = %e, "could not parse finished workout");
            None
        }
    }
}

/// Analyze finished workout files, processed in filename order.
/// An empty list yields an empty result.
pub async fn analyze_workout_files(paths: &[PathBuf]) -> ExerciseTrends {
    let mut ordered: Vec<&PathBuf> = paths.iter().collect();
    ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut records = Vec::with_capacity(ordered.len());
    for path in ordered {
        if let Some(dated) = load_dated_rows(path).await {
            records.push(dated);
        }
    }
    debug!(files = records.len(), "aggregating finished workouts");
    aggregate(records)
}

/// Analyze every finished workout of one athlete
///
/// # Errors
///
/// `StorageError` when the finished store cannot be listed
pub async fn analyze_athlete(store: &WorkoutStore, owner: &str) -> AppResult<ExerciseTrends> {
    let paths: Vec<PathBuf> = store
        .finished_records(owner)
        .await?
        .into_iter()
        .map(|(_, path)| path)
        .collect();
    Ok(analyze_workout_files(&paths).await)
}
