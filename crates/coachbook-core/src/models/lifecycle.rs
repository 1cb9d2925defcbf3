// ABOUTME: Workout lifecycle stores (planned, in-progress, finished) and derived lifecycle state
// ABOUTME: Classifies a workout from which stores currently hold a file for its base name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::workout_file::{CSV_EXTENSION, TRACKED_SUFFIX};
use crate::errors::AppError;

/// One of the three directories a workout file can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStage {
    /// Plans written by a coach or athlete
    Planned,
    /// Tracking copies an athlete is filling in
    InProgress,
    /// Completed records (permanent history)
    Finished,
}

impl WorkoutStage {
    /// All stages in lifecycle order
    pub const ALL: [Self; 3] = [Self::Planned, Self::InProgress, Self::Finished];

    /// Directory name under the data root
    #[must_use]
    pub const fn directory_name(self) -> &'static str {
        match self {
            Self::Planned => "planned_workouts",
            Self::InProgress => "inprogress_workouts",
            Self::Finished => "finished_workouts",
        }
    }

    /// Name used by download requests (`type=plan|tracked|finished`)
    #[must_use]
    pub const fn request_kind(self) -> &'static str {
        match self {
            Self::Planned => "plan",
            Self::InProgress => "tracked",
            Self::Finished => "finished",
        }
    }

    /// Whether a directory entry belongs in listings of this stage
    #[must_use]
    pub fn lists(self, filename: &str) -> bool {
        match self {
            Self::Planned => filename.ends_with(CSV_EXTENSION),
            Self::InProgress | Self::Finished => filename.ends_with(TRACKED_SUFFIX),
        }
    }
}

impl fmt::Display for WorkoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.request_kind())
    }
}

impl FromStr for WorkoutStage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(Self::Planned),
            "tracked" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            other => Err(AppError::invalid_input(format!(
                "Invalid request type '{other}'"
            ))),
        }
    }
}

/// Lifecycle state of one workout, derived from store presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Only the plan exists
    Planned,
    /// Tracking has started
    Active,
    /// A finished record exists
    Finished,
}

impl LifecycleState {
    /// Classify from presence flags. Finished wins over any leftover copies.
    #[must_use]
    pub const fn classify(planned: bool, in_progress: bool, finished: bool) -> Option<Self> {
        if finished {
            Some(Self::Finished)
        } else if in_progress {
            Some(Self::Active)
        } else if planned {
            Some(Self::Planned)
        } else {
            None
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
