// ABOUTME: Domain models shared by the Coachbook service and its tools
// ABOUTME: Re-exports workout identity, lifecycle, identity and row types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

/// Caller identity and ownership rules
pub mod identity;
/// Lifecycle stores and derived states
pub mod lifecycle;
/// Workout rows and numeric coercion
pub mod record;
/// Filename-encoded workout identity
pub mod workout_file;

pub use identity::{Identity, Role};
pub use lifecycle::{LifecycleState, WorkoutStage};
pub use record::{
    coerce_number, ExerciseSet, WorkoutRow, ACTUAL_REPS_COLUMN, ACTUAL_WEIGHT_COLUMN,
    EXERCISE_COLUMN,
};
pub use workout_file::{
    sort_by_date, sort_by_name_desc, DateOrder, WorkoutFileName, CSV_EXTENSION,
    FILENAME_DATE_FORMAT, TRACKED_SUFFIX,
};
