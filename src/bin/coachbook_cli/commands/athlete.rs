// ABOUTME: Athlete inspection commands for coachbook-cli
// ABOUTME: Prints trend analysis, latest exercise history and lifecycle states
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use coachbook::analysis::analyze_athlete;
use coachbook::context::ServerResources;
use coachbook::history::latest_exercise_performance;

use crate::CliResult;

/// Print the athlete's per-exercise trends as pretty JSON
pub async fn analyze(resources: &ServerResources, athlete: &str) -> CliResult<()> {
    let trends = analyze_athlete(&resources.store, athlete).await?;
    println!("{}", serde_json::to_string_pretty(&trends)?);
    Ok(())
}

/// Print the latest sets of one exercise, or a note when there are none
pub async fn history(resources: &ServerResources, athlete: &str, exercise: &str) -> CliResult<()> {
    match latest_exercise_performance(&resources.store, athlete, exercise).await? {
        Some(found) => println!("{}", serde_json::to_string_pretty(&found)?),
        None => eprintln!("No prior history of '{exercise}' for {athlete}"),
    }
    Ok(())
}

/// Print `state<TAB>plan filename` for every workout the athlete has
pub async fn status(resources: &ServerResources, athlete: &str) -> CliResult<()> {
    let snapshot = resources.store.snapshot(athlete).await?;
    let states = snapshot.states();
    if states.is_empty() {
        eprintln!("No workouts for {athlete}");
    }
    for (base, state) in states {
        println!("{}\t{base}", state.as_str());
    }
    Ok(())
}
