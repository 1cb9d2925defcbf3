// ABOUTME: Exercise catalog route handlers
// ABOUTME: Any signed-in user can list exercises; only the coach can add one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::context::ServerResources;
use crate::errors::AppError;

use super::identify;

/// Body of `add_exercise`
#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    /// Name to add
    #[serde(default)]
    pub exercise: String,
}

/// Exercise catalog routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/get_exercises", get(Self::handle_get_exercises))
            .route("/api/add_exercise", post(Self::handle_add_exercise))
            .with_state(resources)
    }

    async fn handle_get_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        identify(&headers, &resources)?;
        let exercises = resources.catalog.list().await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "exercises": exercises })),
        )
            .into_response())
    }

    async fn handle_add_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AddExerciseRequest>,
    ) -> Result<Response, AppError> {
        identify(&headers, &resources)?.require_coach()?;
        let added = resources.catalog.add(&request.exercise).await?;
        Ok((
            StatusCode::CREATED,
            Json(json!({ "status": "success", "message": format!("Exercise '{added}' added.") })),
        )
            .into_response())
    }
}
