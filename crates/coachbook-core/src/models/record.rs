// ABOUTME: Workout row model with permissive numeric coercion for reps and weight
// ABOUTME: Names the CSV columns the analysis and history lookups depend on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use serde::{Deserialize, Serialize};

/// Exercise name column
pub const EXERCISE_COLUMN: &str = "Exercise";

/// Performed repetitions column
pub const ACTUAL_REPS_COLUMN: &str = "Actual Reps";

/// Performed weight column, pounds
pub const ACTUAL_WEIGHT_COLUMN: &str = "Actual Weight (lb)";

/// The fields of one workout row that Coachbook interprets.
/// All other planning columns stay in the file untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRow {
    /// Exercise name as written
    pub exercise: String,
    /// Performed reps (0 when missing or non-numeric)
    pub reps: f64,
    /// Performed weight (0 when missing or non-numeric)
    pub weight: f64,
}

impl WorkoutRow {
    /// Build a row from raw cell text
    #[must_use]
    pub fn from_cells(exercise: &str, reps: Option<&str>, weight: Option<&str>) -> Self {
        Self {
            exercise: exercise.to_owned(),
            reps: coerce_number(reps),
            weight: coerce_number(weight),
        }
    }

    /// reps × weight
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.reps * self.weight
    }
}

/// One performed set as reported by the history lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Performed reps
    #[serde(rename = "Actual Reps")]
    pub reps: f64,
    /// Performed weight
    #[serde(rename = "Actual Weight (lb)")]
    pub weight: f64,
}

impl From<&WorkoutRow> for ExerciseSet {
    fn from(row: &WorkoutRow) -> Self {
        Self {
            reps: row.reps,
            weight: row.weight,
        }
    }
}

/// Parse a numeric cell; anything missing, blank, non-numeric or non-finite is 0
#[must_use]
pub fn coerce_number(cell: Option<&str>) -> f64 {
    cell.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
