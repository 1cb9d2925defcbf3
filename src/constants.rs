// ABOUTME: Application constants for Coachbook storage layout, listings and sessions
// ABOUTME: Central place for directory names, view sizes, cookie names and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

/// Service identity
pub mod service {
    /// Service name reported by health checks and logs
    pub const SERVICE_NAME: &str = "coachbook";
    /// Crate version
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Data directory layout
pub mod storage {
    /// Reference data directory under the data root
    pub const REFERENCE_DIR: &str = "api";
    /// Exercise catalog file inside the reference directory
    pub const EXERCISES_FILE: &str = "exercises.csv";
    /// Athlete contact file inside the reference directory
    pub const CONTACTS_FILE: &str = "emails.csv";
}

/// Sizes of the aggregate views
pub mod views {
    /// Completed workouts shown in the mesocycle view
    pub const MESOCYCLE_COMPLETED_LIMIT: usize = 5;
    /// Upcoming plans shown in the mesocycle view
    pub const MESOCYCLE_PLANNED_LIMIT: usize = 6;
}

/// Session and cookie settings
pub mod session {
    /// Cookie carrying the session token
    pub const AUTH_COOKIE_NAME: &str = "auth_token";
    /// Default session lifetime in hours
    pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
    /// Longest accepted session lifetime in hours (one year)
    pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;
    /// Bytes of randomness for generated session secrets
    pub const GENERATED_SECRET_BYTES: usize = 32;
}

/// HTTP server defaults
pub mod http {
    /// Default bind port
    pub const DEFAULT_PORT: u16 = 5000;
    /// Default per-request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Largest accepted request body (CSV uploads)
    pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
}

/// Default coach username
pub const DEFAULT_COACH_USERNAME: &str = "coach";
