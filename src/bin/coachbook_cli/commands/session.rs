// ABOUTME: Session command for coachbook-cli
// ABOUTME: Prints a signed session token for an athlete or the coach
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use coachbook::config::ServerConfig;
use coachbook::context::ServerResources;
use coachbook::errors::AppError;
use coachbook::models::Identity;

use crate::{CliError, CliResult};

/// Refuse to sign with a per-process key no server will accept
fn require_shared_secret() -> CliResult<()> {
    if ServerConfig::has_shared_session_secret() {
        Ok(())
    } else {
        Err(CliError::Config(AppError::config(
            "SESSION_SECRET must be set to the server's value to issue sessions",
        )))
    }
}

/// Issue a session and print the token on stdout, expiry on stderr.
///
/// Tokens only verify against a server sharing the same `SESSION_SECRET`.
pub fn issue(resources: &ServerResources, athlete: Option<&str>, coach: bool) -> CliResult<()> {
    require_shared_secret()?;

    let identity = if coach {
        Identity::coach(resources.config.auth.coach_username.clone())
    } else {
        let name = athlete
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AppError::invalid_input("Athlete name cannot be empty"))?;
        Identity::athlete(name)
    };

    let session = resources.sessions.issue(&identity)?;
    println!("{}", session.token);
    eprintln!(
        "{} session for '{}' expires {}",
        identity.role,
        identity.username,
        session.expires_at.to_rfc3339()
    );
    Ok(())
}
