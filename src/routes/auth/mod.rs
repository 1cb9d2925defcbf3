// ABOUTME: Authentication route handlers for coach login, logout and the current-user lookup
// ABOUTME: Issues session tokens into an httpOnly cookie and reports the caller's identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Authentication routes
//!
//! ## Module Structure
//! - `types` - Request/response DTOs for auth endpoints

mod types;

pub use types::{CurrentUserResponse, LoginRequest, LoginResponse, UserInfo};

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tracing::{field::Empty, info, warn, Span};

use crate::auth::verify_coach_credentials;
use crate::context::ServerResources;
use crate::errors::AppError;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie};

use super::identify;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/login", post(Self::handle_login))
            .route("/logout", post(Self::handle_logout))
            .route("/api/get_current_user", get(Self::handle_current_user))
            .with_state(resources)
    }

    /// Read login fields from a JSON body or a urlencoded form
    async fn read_login(request: Request) -> Result<LoginRequest, AppError> {
        let is_json = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(login) = Json::<LoginRequest>::from_request(request, &())
                .await
                .map_err(|e| AppError::invalid_input(e.body_text()))?;
            Ok(login)
        } else {
            let Form(login) = Form::<LoginRequest>::from_request(request, &())
                .await
                .map_err(|e| AppError::invalid_input(e.body_text()))?;
            Ok(login)
        }
    }

    /// Coach login. Sets the session cookie and returns the token.
    #[tracing::instrument(skip(resources, request), fields(route = "login", success = Empty))]
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        request: Request,
    ) -> Result<Response, AppError> {
        let login = Self::read_login(request).await?;

        let identity =
            verify_coach_credentials(&resources.config.auth, &login.username, &login.password)
                .inspect_err(|_| warn!(username = %login.username, "rejected login"))?;

        let session = resources.sessions.issue(&identity)?;
        let mut headers = HeaderMap::new();
        set_auth_cookie(&mut headers, &session.token, resources.sessions.ttl_secs());

        Span::current().record("success", true);
        info!(username = %identity.username, "coach logged in");

        let response = LoginResponse {
            status: "success",
            token: session.token,
            expires_at: session.expires_at.to_rfc3339(),
            user: UserInfo {
                username: identity.username,
                role: identity.role,
            },
        };
        Ok((StatusCode::OK, headers, Json(response)).into_response())
    }

    /// Clear the session cookie. Tokens are stateless and stay valid until expiry.
    async fn handle_logout() -> Response {
        let mut headers = HeaderMap::new();
        clear_auth_cookie(&mut headers);
        (
            StatusCode::OK,
            headers,
            Json(json!({ "status": "success", "message": "Logged out successfully" })),
        )
            .into_response()
    }

    async fn handle_current_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let identity = identify(&headers, &resources)?;
        let response = CurrentUserResponse {
            status: "success",
            username: identity.username,
            role: identity.role,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
