// ABOUTME: Analysis route handlers over an athlete's finished workouts
// ABOUTME: Serves per-exercise trends and the latest performance of one exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::analysis::analyze_athlete;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::history::latest_exercise_performance;

use super::identify;
use super::workouts::UserQuery;

/// Query of `get_exercise_history`
#[derive(Debug, Deserialize)]
pub struct ExerciseHistoryQuery {
    /// Athlete
    pub user: Option<String>,
    /// Exercise name
    pub exercise: Option<String>,
}

/// Analysis routes
pub struct AnalysisRoutes;

impl AnalysisRoutes {
    /// Create all analysis routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/get_analysis", get(Self::handle_get_analysis))
            .route(
                "/api/get_exercise_history",
                get(Self::handle_exercise_history),
            )
            .with_state(resources)
    }

    async fn handle_get_analysis(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let owner = identity.resolve_owner(query.user.as_deref())?;
        let analysis = analyze_athlete(&resources.store, owner).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "analysis": analysis })),
        )
            .into_response())
    }

    /// Both `user` and `exercise` are required here, unlike the listing endpoints
    async fn handle_exercise_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ExerciseHistoryQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let (Some(user), Some(exercise)) = (
            query.user.as_deref().map(str::trim).filter(|u| !u.is_empty()),
            query
                .exercise
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty()),
        ) else {
            return Err(AppError::missing_field(
                "User and exercise parameters are required.",
            ));
        };
        identity.authorize_owner(user)?;

        let body = match latest_exercise_performance(&resources.store, user, exercise).await? {
            Some(history) => json!({ "status": "success", "history": history }),
            None => json!({
                "status": "success",
                "history": null,
                "message": "No prior history found.",
            }),
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }
}
