// ABOUTME: Workout lifecycle route handlers for plans, tracking copies and finished records
// ABOUTME: Lists, saves, completes, downloads and deletes workouts with filename-based ownership checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Workout routes
//!
//! Ownership is the filename prefix: an athlete may only touch files whose
//! owner segment is their username, the coach may touch any file. Listing
//! endpoints take an optional `user` parameter that defaults to the caller.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::WorkoutStage;
use crate::notifications::spawn_completion_notice;
use crate::storage::{validate_filename, validate_name};

use super::{identify, required};

/// Optional target athlete
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// Athlete to view; defaults to the caller
    pub user: Option<String>,
}

/// Body of `save_plan` and `save_progress`
#[derive(Debug, Deserialize)]
pub struct SaveWorkoutRequest {
    /// Target filename
    pub filename: Option<String>,
    /// CSV written verbatim
    pub csv_content: Option<String>,
}

/// Body of `complete_workout`
#[derive(Debug, Deserialize)]
pub struct CompleteWorkoutRequest {
    /// Plan being completed
    pub plan_filename: Option<String>,
    /// Finished record name (`_tracked.csv`)
    pub tracked_filename: Option<String>,
    /// CSV of the finished record
    pub csv_content: Option<String>,
}

/// Body of `delete_plan`
#[derive(Debug, Deserialize)]
pub struct DeletePlanRequest {
    /// Plan to delete
    pub filename: Option<String>,
}

/// Query of `get_workout`
#[derive(Debug, Deserialize)]
pub struct GetWorkoutQuery {
    /// File to download
    pub filename: Option<String>,
    /// Store: `plan`, `tracked` or `finished`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Workout lifecycle routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/get_athletes", get(Self::handle_get_athletes))
            .route(
                "/api/list_workouts_for_tracker",
                get(Self::handle_list_for_tracker),
            )
            .route("/api/mesocycle_view", get(Self::handle_mesocycle_view))
            .route("/api/list_templates", get(Self::handle_list_templates))
            .route("/api/get_workout", get(Self::handle_get_workout))
            .route("/api/save_plan", post(Self::handle_save_plan))
            .route("/api/save_progress", post(Self::handle_save_progress))
            .route("/api/complete_workout", post(Self::handle_complete_workout))
            .route("/api/delete_plan", post(Self::handle_delete_plan))
            .with_state(resources)
    }

    async fn handle_get_athletes(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        identify(&headers, &resources)?.require_coach()?;
        let athletes = resources.store.list_athletes().await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "athletes": athletes })),
        )
            .into_response())
    }

    async fn handle_list_for_tracker(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let owner = identity.resolve_owner(query.user.as_deref())?;
        let listing = resources.store.list_active(owner).await?;
        Ok((
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "plans": listing.plans,
                "tracked": listing.tracked,
            })),
        )
            .into_response())
    }

    async fn handle_mesocycle_view(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let owner = identity.resolve_owner(query.user.as_deref())?;
        let view = resources.store.mesocycle_view(owner).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "data": view })),
        )
            .into_response())
    }

    async fn handle_list_templates(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<UserQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let owner = identity.resolve_owner(query.user.as_deref())?;
        let templates = resources.store.list_templates(owner).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "templates": templates })),
        )
            .into_response())
    }

    /// Download a workout as a CSV attachment
    async fn handle_get_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<GetWorkoutQuery>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let file = validate_name(required(query.filename.as_deref(), "filename")?)?;
        identity.authorize_file(&file)?;

        let stage: WorkoutStage = query
            .kind
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|_| AppError::invalid_input("Invalid request type."))?;

        let content = resources.store.read(stage, &file.raw).await?;
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.raw))
            .map_err(|e| AppError::internal(format!("Invalid download header: {e}")))?;
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            content,
        )
            .into_response())
    }

    async fn save_to(
        resources: &ServerResources,
        headers: &HeaderMap,
        stage: WorkoutStage,
        request: SaveWorkoutRequest,
    ) -> Result<String, AppError> {
        let identity = identify(headers, resources)?;
        let file = validate_filename(stage, required(request.filename.as_deref(), "filename")?)?;
        identity.authorize_file(&file)?;
        let content = request
            .csv_content
            .ok_or_else(|| AppError::missing_field("'csv_content' is required"))?;
        let saved = resources.store.save(stage, &file.raw, &content).await?;
        Ok(saved.raw)
    }

    async fn handle_save_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SaveWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let filename = Self::save_to(&resources, &headers, WorkoutStage::Planned, request).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "message": format!("Plan '{filename}' saved.") })),
        )
            .into_response())
    }

    async fn handle_save_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SaveWorkoutRequest>,
    ) -> Result<Response, AppError> {
        Self::save_to(&resources, &headers, WorkoutStage::InProgress, request).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "message": "Progress saved." })),
        )
            .into_response())
    }

    /// Archive a workout, then notify the athlete in the background
    async fn handle_complete_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CompleteWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let plan = validate_filename(
            WorkoutStage::Planned,
            required(request.plan_filename.as_deref(), "plan_filename")?,
        )?;
        let tracked = validate_filename(
            WorkoutStage::Finished,
            required(request.tracked_filename.as_deref(), "tracked_filename")?,
        )?;
        identity.authorize_file(&plan)?;
        identity.authorize_file(&tracked)?;
        let content = request
            .csv_content
            .ok_or_else(|| AppError::missing_field("'csv_content' is required"))?;

        let outcome = resources
            .store
            .complete_workout(&plan.raw, &tracked.raw, &content)
            .await?;

        spawn_completion_notice(
            Arc::clone(&resources.contacts),
            Arc::clone(&resources.notifier),
            outcome.finished,
            outcome.finished_path,
        );

        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "message": "Workout completed." })),
        )
            .into_response())
    }

    async fn handle_delete_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<DeletePlanRequest>,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let file = validate_filename(
            WorkoutStage::Planned,
            required(request.filename.as_deref(), "filename")?,
        )?;
        identity.authorize_file(&file)?;
        resources.store.delete_plan(&file.raw).await?;
        info!(by = %identity.username, filename = %file.raw, "plan deleted on request");
        Ok((
            StatusCode::OK,
            Json(json!({ "status": "success", "message": format!("Plan '{}' deleted.", file.raw) })),
        )
            .into_response())
    }
}
