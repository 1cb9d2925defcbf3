// ABOUTME: HTTP security helpers for coachbook sessions
// ABOUTME: Currently the auth cookie handling used by login, logout and request authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

/// Secure HTTP cookie utilities
pub mod cookies;
