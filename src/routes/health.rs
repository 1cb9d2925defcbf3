// ABOUTME: Health check route for load balancers and operators
// ABOUTME: Returns the health report with 503 when the service is unhealthy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::context::ServerResources;
use crate::health::HealthStatus;

/// Health routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let report = resources.health.check().await;
        let status = if report.status == HealthStatus::Unhealthy {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::OK
        };
        (status, Json(report)).into_response()
    }
}
