// ABOUTME: Command implementations for coachbook-cli
// ABOUTME: One module per command family
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

/// Analysis, history and lifecycle status of one athlete
pub mod athlete;
/// Exercise catalog management
pub mod exercises;
/// Session token issuance
pub mod session;
