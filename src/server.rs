// ABOUTME: HTTP server assembly for coachbook: route composition, middleware and serving
// ABOUTME: Adds tracing spans, request ids, CORS, timeouts and body limits, and shuts down gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{info, warn, Level};

use crate::config::ServerConfig;
use crate::constants::http::MAX_BODY_BYTES;
use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::routes::{AnalysisRoutes, AuthRoutes, ExerciseRoutes, HealthRoutes, WorkoutRoutes};

/// Complete application router with middleware
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);
    let timeout = resources.config.request_timeout;

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(AnalysisRoutes::routes(Arc::clone(&resources)))
        .merge(ExerciseRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS from the configured origins; no origins means any origin without credentials
fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        base.allow_origin(AllowOrigin::any())
    } else {
        base.allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// `InternalError` when the listener cannot bind or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr = resources.config.bind_addr();
    let app = build_router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Cannot bind {addr}: {e}")))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
                    _ = tokio::signal::ctrl_c() => info!("Ctrl-C received, shutting down"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "cannot listen for SIGTERM, only Ctrl-C stops the server"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}
