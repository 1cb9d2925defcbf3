// ABOUTME: Route module organization for the coachbook HTTP API
// ABOUTME: Groups handlers by domain and holds the helpers they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Route module for coachbook
//!
//! Each domain module exposes a `*Routes` type whose `routes` function
//! builds an axum `Router` over the shared [`ServerResources`]. Handlers
//! authenticate, check ownership against the filename, and delegate to the
//! store, analysis, history and catalog layers.

/// Per-exercise trends and latest-performance lookups
pub mod analysis;
/// Login, logout and current user
pub mod auth;
/// Exercise catalog
pub mod exercises;
/// Health check
pub mod health;
/// Workout lifecycle: listings, saves, completion, downloads
pub mod workouts;

use axum::http::HeaderMap;

use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::models::Identity;

pub use analysis::AnalysisRoutes;
pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use workouts::WorkoutRoutes;

/// Identity of the caller, from the bearer header or the auth cookie
pub(crate) fn identify(headers: &HeaderMap, resources: &ServerResources) -> AppResult<Identity> {
    crate::auth::authenticate(headers, &resources.sessions)
}

/// Non-empty request field or `MissingRequiredField`
pub(crate) fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(format!("'{field}' is required")))
}
