// ABOUTME: Helper modules shared by integration tests
// ABOUTME: Currently the in-process axum request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

pub mod axum_test;
