// ABOUTME: Unified error type with stable error codes shared by storage, routes and binaries
// ABOUTME: Maps each error code to an HTTP status and renders JSON error bodies when enabled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Unified error handling
//!
//! Every fallible operation in Coachbook returns [`AppResult`]. The
//! [`ErrorCode`] carried by an [`AppError`] decides how the error is reported
//! to HTTP callers, so "permission denied" stays distinct from "not found"
//! and "duplicate" stays distinct from "invalid input".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No credentials were supplied
    AuthRequired,
    /// Credentials or session token were rejected
    AuthInvalid,
    /// Session token has expired
    AuthExpired,
    /// Caller is authenticated but may not act on this resource
    PermissionDenied,
    /// Requested resource does not exist
    ResourceNotFound,
    /// Resource with the same identity already exists
    ResourceAlreadyExists,
    /// Input failed validation
    InvalidInput,
    /// A required parameter was not supplied
    MissingRequiredField,
    /// Input could not be parsed
    InvalidFormat,
    /// Filesystem read or write failed
    StorageError,
    /// Configuration is missing or malformed
    ConfigError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,
            Self::PermissionDenied => 403,
            Self::ResourceNotFound => 404,
            Self::ResourceAlreadyExists => 409,
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => 400,
            Self::StorageError | Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Machine readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "auth_required",
            Self::AuthInvalid => "auth_invalid",
            Self::AuthExpired => "auth_expired",
            Self::PermissionDenied => "permission_denied",
            Self::ResourceNotFound => "resource_not_found",
            Self::ResourceAlreadyExists => "resource_already_exists",
            Self::InvalidInput => "invalid_input",
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidFormat => "invalid_format",
            Self::StorageError => "storage_error",
            Self::ConfigError => "config_error",
            Self::InternalError => "internal_error",
        }
    }

    /// Whether this code represents a server-side failure
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.http_status() >= 500
    }
}

/// Application error with a code and a human readable message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Message shown to callers
    pub message: String,
}

/// Result alias used across Coachbook
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error with an explicit code
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Missing credentials
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Rejected credentials or token
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Caller may not act on the resource
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Resource does not exist; `resource` names it, e.g. `"Plan 'x.csv'"`
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Validation failure
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required parameter absent
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Filesystem failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Unexpected failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use serde_json::json;
    use tracing::error;

    use super::AppError;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.code.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if self.code.is_server_error() {
                error!(code = self.code.as_str(), "{}", self.message);
            }
            let body = json!({
                "status": "error",
                "code": self.code.as_str(),
                "message": self.message,
            });
            (status, Json(body)).into_response()
        }
    }
}
