// ABOUTME: Configuration module for Coachbook
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

/// Environment variable configuration
pub mod environment;

pub use environment::{AuthConfig, LogFormat, LoggingConfig, ServerConfig};
