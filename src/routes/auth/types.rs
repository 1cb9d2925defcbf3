// ABOUTME: Request and response types for login, logout and current-user routes
// ABOUTME: Login accepts the same fields as a JSON body or an HTML form post
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Coach login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Coach username
    pub username: String,
    /// Coach password
    pub password: String,
}

/// Public view of the caller
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// Username
    pub username: String,
    /// Role
    pub role: Role,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `"success"`
    pub status: &'static str,
    /// Session token, also set as the `auth_token` cookie
    pub token: String,
    /// Expiry (RFC 3339)
    pub expires_at: String,
    /// Logged-in user
    pub user: UserInfo,
}

/// Current user response
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    /// Always `"success"`
    pub status: &'static str,
    /// Username
    pub username: String,
    /// Role
    pub role: Role,
}
