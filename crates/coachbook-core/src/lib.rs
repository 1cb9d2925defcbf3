// ABOUTME: Core domain crate for Coachbook
// ABOUTME: Holds the error model and the filename-encoded workout data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

#![deny(unsafe_code)]

//! # Coachbook Core
//!
//! Types shared by the Coachbook server, CLI and tests:
//!
//! - [`errors`]: `AppError` / `ErrorCode` with optional HTTP rendering
//! - [`models`]: workout file identity, lifecycle stages, roles, rows

/// Unified error type and codes
pub mod errors;

/// Domain models
pub mod models;
