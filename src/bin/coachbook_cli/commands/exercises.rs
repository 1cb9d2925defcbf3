// ABOUTME: Exercise catalog commands for coachbook-cli
// ABOUTME: Lists the catalog or adds a new exercise to it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use coachbook::context::ServerResources;

use crate::CliResult;

/// Print every exercise, one per line
pub async fn list(resources: &ServerResources) -> CliResult<()> {
    let exercises = resources.catalog.list().await?;
    if exercises.is_empty() {
        eprintln!(
            "No exercises in {}",
            resources.catalog.path().display()
        );
    }
    for exercise in exercises {
        println!("{exercise}");
    }
    Ok(())
}

/// Add an exercise to the catalog
pub async fn add(resources: &ServerResources, name: &str) -> CliResult<()> {
    let added = resources.catalog.add(name).await?;
    println!("Added '{added}'");
    Ok(())
}
