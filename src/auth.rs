// ABOUTME: Session tokens and request authentication for coach and athlete identities
// ABOUTME: Issues and verifies HS256 JWTs and checks the configured coach credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # Authentication
//!
//! A session is an HS256 JWT carrying the username and role. The token is
//! accepted from an `Authorization: Bearer` header or from the `auth_token`
//! cookie set at login. Only the coach logs in with a password; athlete
//! sessions are issued out of band (see the `coachbook-cli session` command).

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::constants::session::{AUTH_COOKIE_NAME, DEFAULT_SESSION_TTL_HOURS};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Identity, Role};
use crate::security::cookies::get_cookie_value;

/// JWT claims of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Role of the user
    pub role: Role,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Identity the claims describe
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.sub.clone(),
            role: self.role,
        }
    }
}

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Encoded JWT
    pub token: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionManager {
    /// Manager signing with `secret`, issuing sessions valid for `ttl`
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Manager from the auth section of the server configuration.
    ///
    /// A lifetime outside the representable range falls back to the default.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let ttl = Duration::try_hours(config.session_ttl_hours)
            .unwrap_or_else(|| Duration::hours(DEFAULT_SESSION_TTL_HOURS));
        Self::new(config.session_secret.as_bytes(), ttl)
    }

    /// Session lifetime in whole seconds, used for the cookie `Max-Age`
    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Sign a session for `identity`
    ///
    /// # Errors
    ///
    /// `InternalError` when signing fails or the expiry is not representable
    pub fn issue(&self, identity: &Identity) -> AppResult<IssuedSession> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Session lifetime overflows the clock"))?;
        let claims = Claims {
            sub: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session: {e}")))?;
        Ok(IssuedSession { token, expires_at })
    }

    /// Verify a token and return its identity
    ///
    /// # Errors
    ///
    /// `AuthExpired` for an expired token, `AuthInvalid` for any other failure
    pub fn verify(&self, token: &str) -> AppResult<Identity> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!(error = %e, "session token rejected");
            match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::new(ErrorCode::AuthExpired, "Session expired")
                }
                _ => AppError::auth_invalid("Invalid session token"),
            }
        })?;
        Ok(data.claims.identity())
    }
}

/// Check the coach's username and password against the configuration.
///
/// Both comparisons run in constant time and are always evaluated.
///
/// # Errors
///
/// `AuthInvalid` when either value does not match
pub fn verify_coach_credentials(
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> AppResult<Identity> {
    let user_ok = username
        .as_bytes()
        .ct_eq(config.coach_username.as_bytes());
    let pass_ok = password
        .as_bytes()
        .ct_eq(config.coach_password.as_bytes());
    if bool::from(user_ok & pass_ok) {
        Ok(Identity::coach(config.coach_username.clone()))
    } else {
        Err(AppError::auth_invalid("Invalid credentials"))
    }
}

/// Session token from the `Authorization` header, falling back to the auth cookie
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);
    bearer.or_else(|| get_cookie_value(headers, AUTH_COOKIE_NAME).filter(|t| !t.is_empty()))
}

/// Authenticate a request
///
/// # Errors
///
/// `AuthRequired` when no token is present, otherwise the errors of [`SessionManager::verify`]
pub fn authenticate(headers: &HeaderMap, sessions: &SessionManager) -> AppResult<Identity> {
    let token = extract_token(headers).ok_or_else(AppError::auth_required)?;
    sessions.verify(&token)
}
