// ABOUTME: Command-line companion for coachbook operators
// ABOUTME: Issues sessions, manages the exercise catalog and inspects athlete data offline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # coachbook-cli
//!
//! Works directly on the data directory of a coachbook server, using the
//! same environment configuration. `COACH_PASSWORD` is not needed;
//! `session` requires the server's `SESSION_SECRET`.
//!
//! ```bash
//! # Session token for an athlete (needs the server's SESSION_SECRET)
//! coachbook-cli session --athlete alex
//!
//! # Catalog
//! coachbook-cli exercises list
//! coachbook-cli exercises add "Romanian Deadlift"
//!
//! # Inspection
//! coachbook-cli analyze --athlete alex
//! coachbook-cli history --athlete alex --exercise squat
//! coachbook-cli status --athlete alex
//! ```

mod commands;

use clap::{ArgGroup, Parser, Subcommand};
use thiserror::Error;

use coachbook::config::environment::ServerConfig;
use coachbook::context::ServerResources;
use coachbook::errors::AppError;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Environment configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(AppError),

    /// A store, catalog or session operation failed
    #[error(transparent)]
    App(#[from] AppError),

    /// Output could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a CLI command
pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(
    name = "coachbook-cli",
    about = "Coachbook operator tool",
    long_about = "Issue sessions, manage the exercise catalog and inspect athlete workouts"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a session token
    #[command(group(ArgGroup::new("who").required(true).args(["athlete", "coach"])))]
    Session {
        /// Athlete to issue the session for
        #[arg(long)]
        athlete: Option<String>,
        /// Issue a coach session instead
        #[arg(long)]
        coach: bool,
    },
    /// Exercise catalog
    Exercises {
        #[command(subcommand)]
        action: ExercisesAction,
    },
    /// Print per-exercise trends as JSON
    Analyze {
        /// Athlete to analyze
        #[arg(long)]
        athlete: String,
    },
    /// Print the latest performance of one exercise
    History {
        /// Athlete
        #[arg(long)]
        athlete: String,
        /// Exercise name (case-insensitive)
        #[arg(long)]
        exercise: String,
    },
    /// Print the lifecycle state of every workout of an athlete
    Status {
        /// Athlete
        #[arg(long)]
        athlete: String,
    },
}

#[derive(Subcommand)]
enum ExercisesAction {
    /// List all exercises
    List,
    /// Add an exercise
    Add {
        /// Exercise name
        name: String,
    },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env_offline().map_err(CliError::Config)?;
    let resources = ServerResources::new(config);

    match cli.command {
        Command::Session { athlete, coach } => {
            commands::session::issue(&resources, athlete.as_deref(), coach)
        }
        Command::Exercises { action } => match action {
            ExercisesAction::List => commands::exercises::list(&resources).await,
            ExercisesAction::Add { name } => commands::exercises::add(&resources, &name).await,
        },
        Command::Analyze { athlete } => commands::athlete::analyze(&resources, &athlete).await,
        Command::History { athlete, exercise } => {
            commands::athlete::history(&resources, &athlete, &exercise).await
        }
        Command::Status { athlete } => commands::athlete::status(&resources, &athlete).await,
    }
}
