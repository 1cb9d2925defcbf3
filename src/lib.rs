// ABOUTME: Main library entry point for the coachbook workout service
// ABOUTME: Exposes the lifecycle store, analysis, catalog, sessions and HTTP API modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

#![deny(unsafe_code)]

//! # Coachbook
//!
//! A small coaching service: a coach plans workouts for athletes, athletes
//! track progress against those plans, and completed workouts are archived
//! and analyzed for max-weight and volume trends.
//!
//! ## Storage
//!
//! Workouts are CSV files whose names carry their identity:
//! `{owner}_{...}_{YYYY-MM-DD}.csv` for plans and `..._tracked.csv` for
//! tracking copies and finished records. Three directories hold the
//! lifecycle stages (planned, in progress, finished); the stage a workout is
//! in is derived from where its files are.
//!
//! ## Architecture
//!
//! - **Storage**: the lifecycle store and CSV row extraction
//! - **Analysis / History**: trends and latest performance over finished records
//! - **Catalog / Contacts**: reference CSVs for exercise names and athlete addresses
//! - **Auth**: coach login and HS256 session tokens
//! - **Routes / Server**: the axum HTTP API
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coachbook::config::environment::ServerConfig;
//! use coachbook::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("coachbook configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Unified error types (from `coachbook-core`)
pub use coachbook_core::errors;

/// Domain value types (from `coachbook-core`)
pub use coachbook_core::models;

/// Per-exercise trend analysis
pub mod analysis;

/// Session tokens and request authentication
pub mod auth;

/// Exercise catalog
pub mod catalog;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Athlete contact directory
pub mod contacts;

/// Shared server resources
pub mod context;

/// Health reporting
pub mod health;

/// Latest exercise performance lookup
pub mod history;

/// Logging setup
pub mod logging;

/// Completion notifications
pub mod notifications;

/// HTTP routes
pub mod routes;

/// Cookie handling
pub mod security;

/// HTTP server assembly
pub mod server;

/// Filesystem lifecycle store
pub mod storage;
