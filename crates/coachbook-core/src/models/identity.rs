// ABOUTME: Caller identity (username + role) and the filename-prefix ownership rules
// ABOUTME: Coaches may act on any owner, athletes only on records encoded with their own name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::workout_file::WorkoutFileName;
use crate::errors::{AppError, AppResult};

/// Role of an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages plans for every athlete
    Coach,
    /// Tracks their own workouts
    Athlete,
}

impl Role {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coach => "coach",
            Self::Athlete => "athlete",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coach" => Ok(Self::Coach),
            "athlete" => Ok(Self::Athlete),
            other => Err(AppError::invalid_input(format!("Unknown role '{other}'"))),
        }
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Username; for athletes this is the filename owner prefix
    pub username: String,
    /// Role
    pub role: Role,
}

impl Identity {
    /// Coach identity
    #[must_use]
    pub fn coach(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Coach,
        }
    }

    /// Athlete identity
    #[must_use]
    pub fn athlete(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Athlete,
        }
    }

    /// Whether this caller is the coach
    #[must_use]
    pub fn is_coach(&self) -> bool {
        self.role == Role::Coach
    }

    /// Whether this caller may act on records of `owner`
    #[must_use]
    pub fn can_access(&self, owner: &str) -> bool {
        self.is_coach() || self.username.to_lowercase() == owner.to_lowercase()
    }

    /// Deny unless this caller may act on records of `owner`
    ///
    /// # Errors
    ///
    /// `PermissionDenied` for an athlete naming another owner
    pub fn authorize_owner(&self, owner: &str) -> AppResult<()> {
        if self.can_access(owner) {
            Ok(())
        } else {
            Err(AppError::permission_denied("Permission denied."))
        }
    }

    /// Deny unless the file's encoded owner is accessible to this caller
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when the filename prefix is not the caller's
    pub fn authorize_file(&self, file: &WorkoutFileName) -> AppResult<()> {
        if self.is_coach() || file.is_owned_by(&self.username) {
            Ok(())
        } else {
            Err(AppError::permission_denied("Permission denied."))
        }
    }

    /// Deny unless this caller is the coach
    ///
    /// # Errors
    ///
    /// `PermissionDenied` for athletes
    pub fn require_coach(&self) -> AppResult<()> {
        if self.is_coach() {
            Ok(())
        } else {
            Err(AppError::permission_denied("Coach access required"))
        }
    }

    /// Resolve the owner a request targets, defaulting to the caller, and authorize it
    ///
    /// # Errors
    ///
    /// `PermissionDenied` when the resolved owner is not accessible
    pub fn resolve_owner<'a>(&'a self, requested: Option<&'a str>) -> AppResult<&'a str> {
        let owner = requested
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.username.as_str());
        self.authorize_owner(owner)?;
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn athlete_cannot_view_another_athlete() {
        let alex = Identity::athlete("alex");
        let err = alex.resolve_owner(Some("sam")).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(alex.resolve_owner(None).unwrap(), "alex");
        assert_eq!(alex.resolve_owner(Some("Alex")).unwrap(), "Alex");
    }

    #[test]
    fn coach_is_never_denied() {
        let coach = Identity::coach("coach");
        for owner in ["alex", "sam", "anyone"] {
            assert!(coach.authorize_owner(owner).is_ok());
        }
        let file = WorkoutFileName::parse("sam_legs_2024-01-01.csv").unwrap();
        assert!(coach.authorize_file(&file).is_ok());
    }

    #[test]
    fn file_authorization_uses_encoded_owner() {
        let alex = Identity::athlete("alex");
        let own = WorkoutFileName::parse("alex_legs_2024-01-01.csv").unwrap();
        let other = WorkoutFileName::parse("alexander_legs_2024-01-01.csv").unwrap();
        assert!(alex.authorize_file(&own).is_ok());
        assert_eq!(
            alex.authorize_file(&other).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        assert!(alex.require_coach().is_err());
    }
}
