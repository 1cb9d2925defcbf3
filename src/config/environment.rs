// ABOUTME: Environment-based server configuration for Coachbook
// ABOUTME: Reads data directory, bind address, coach credentials, session and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Environment configuration
//!
//! Coachbook is configured from environment variables only. Every setting
//! except `COACH_PASSWORD` has a default; malformed numbers are reported as
//! `ConfigError` instead of silently falling back.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rand::RngCore;
use tracing::warn;

use crate::constants::{
    http::{DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS},
    session::{DEFAULT_SESSION_TTL_HOURS, GENERATED_SECRET_BYTES, MAX_SESSION_TTL_HOURS},
    storage::{CONTACTS_FILE, EXERCISES_FILE, REFERENCE_DIR},
    DEFAULT_COACH_USERNAME,
};
use crate::errors::{AppError, AppResult};
use crate::models::WorkoutStage;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, colored when attached to a terminal
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!("Unknown LOG_FORMAT '{other}'"))),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// Coach account and session signing settings
#[derive(Clone)]
pub struct AuthConfig {
    /// Coach username
    pub coach_username: String,
    /// Coach password
    pub coach_password: String,
    /// HMAC key for session tokens
    pub session_secret: String,
    /// Session lifetime in hours
    pub session_ttl_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("coach_username", &self.coach_username)
            .field("coach_password", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory of the three stores and reference data
    pub data_dir: PathBuf,
    /// Bind host
    pub host: IpAddr,
    /// Bind port
    pub http_port: u16,
    /// Coach account and sessions
    pub auth: AuthConfig,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Logging
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the data directory and coach password
    pub fn new(data_dir: impl Into<PathBuf>, coach_password: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: DEFAULT_PORT,
            auth: AuthConfig {
                coach_username: DEFAULT_COACH_USERNAME.to_owned(),
                coach_password: coach_password.into(),
                session_secret: generate_session_secret(),
                session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            },
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `COACH_PASSWORD` is missing or a value is malformed
    pub fn from_env() -> AppResult<Self> {
        let coach_password = env::var("COACH_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::config("COACH_PASSWORD must be set"))?;
        Self::load(coach_password)
    }

    /// Load configuration for offline tools that never check the coach password.
    ///
    /// `COACH_PASSWORD` is optional here; everything else is read as in [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is malformed
    pub fn from_env_offline() -> AppResult<Self> {
        Self::load(env::var("COACH_PASSWORD").unwrap_or_default())
    }

    /// Whether `SESSION_SECRET` is set, so issued tokens verify on a server sharing it
    #[must_use]
    pub fn has_shared_session_secret() -> bool {
        env::var("SESSION_SECRET").is_ok_and(|s| !s.is_empty())
    }

    fn load(coach_password: String) -> AppResult<Self> {
        let session_secret = env::var("SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                warn!("SESSION_SECRET not set; generated a per-process secret, sessions end on restart");
                generate_session_secret()
            });

        let session_ttl_hours = parse_env("SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours)
            || chrono::Duration::try_hours(session_ttl_hours).is_none()
        {
            return Err(AppError::config(format!(
                "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}"
            )));
        }

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let logging = LoggingConfig {
            filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()),
            format: env::var("LOG_FORMAT")
                .ok()
                .map(|f| f.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
        };

        Ok(Self {
            data_dir: env::var("COACHBOOK_DATA_DIR")
                .map_or_else(|_| PathBuf::from("./data"), PathBuf::from),
            host: parse_env("HTTP_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            http_port: parse_env("HTTP_PORT", DEFAULT_PORT)?,
            auth: AuthConfig {
                coach_username: env::var("COACH_USERNAME")
                    .unwrap_or_else(|_| DEFAULT_COACH_USERNAME.to_owned()),
                coach_password,
                session_secret,
                session_ttl_hours,
            },
            request_timeout: Duration::from_secs(parse_env(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            cors_allowed_origins,
            logging,
        })
    }

    /// Socket address to bind
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// Directory of one lifecycle store
    #[must_use]
    pub fn stage_dir(&self, stage: WorkoutStage) -> PathBuf {
        self.data_dir.join(stage.directory_name())
    }

    /// Reference data directory
    #[must_use]
    pub fn reference_dir(&self) -> PathBuf {
        self.data_dir.join(REFERENCE_DIR)
    }

    /// Exercise catalog path
    #[must_use]
    pub fn exercises_path(&self) -> PathBuf {
        self.reference_dir().join(EXERCISES_FILE)
    }

    /// Athlete contacts path
    #[must_use]
    pub fn contacts_path(&self) -> PathBuf {
        self.reference_dir().join(CONTACTS_FILE)
    }

    /// Data root
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn parse_env<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {name} '{raw}': {e}"))),
        _ => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_owned)
        .collect()
}

fn generate_session_secret() -> String {
    let mut bytes = [0_u8; GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
