// ABOUTME: Integration tests for trend analysis, exercise history and the exercise catalog
// ABOUTME: Exercises the readers over real files in a temporary data directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{create_test_env, SQUAT_BENCH_CSV};
use coachbook::analysis::analyze_athlete;
use coachbook::catalog::ExerciseCatalog;
use coachbook::errors::ErrorCode;
use coachbook::history::latest_exercise_performance;
use coachbook::models::WorkoutStage;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn analysis_computes_daily_max_and_volume() {
    let env = create_test_env().await;
    env.put(
        WorkoutStage::Finished,
        "alex_a_2024-01-01_tracked.csv",
        "Exercise,Actual Reps,Actual Weight (lb)\nSquat,5,100\n",
    );
    env.put(
        WorkoutStage::Finished,
        "alex_b_2024-01-02_tracked.csv",
        "Exercise,Actual Reps,Actual Weight (lb)\nSquat,5,0\n",
    );

    let trends = analyze_athlete(&env.resources.store, "alex").await.unwrap();
    let squat = &trends["Squat"];
    assert_eq!(squat.len(), 2);
    assert_eq!(squat[0].date, date("2024-01-01"));
    assert!((squat[0].max_weight - 100.0).abs() < f64::EPSILON);
    assert!((squat[0].total_volume - 500.0).abs() < f64::EPSILON);
    assert_eq!(squat[1].date, date("2024-01-02"));
    assert!(squat[1].total_volume.abs() < f64::EPSILON);
}

#[tokio::test]
async fn analysis_without_weight_column_has_zero_volume() {
    let env = create_test_env().await;
    env.put(
        WorkoutStage::Finished,
        "alex_a_2024-01-01_tracked.csv",
        "Exercise,Actual Reps\nPull Up,10\nPull Up,8\n",
    );
    let trends = analyze_athlete(&env.resources.store, "alex").await.unwrap();
    let pull_up = &trends["Pull Up"];
    assert_eq!(pull_up.len(), 1);
    assert!(pull_up[0].total_volume.abs() < f64::EPSILON);
    assert!(pull_up[0].max_weight.abs() < f64::EPSILON);
}

#[tokio::test]
async fn analysis_skips_undated_and_malformed_files() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Finished, "alex_a_2024-01-01_tracked.csv", SQUAT_BENCH_CSV);
    env.put(WorkoutStage::Finished, "alex_b_notadate_tracked.csv", SQUAT_BENCH_CSV);
    env.put(
        WorkoutStage::Finished,
        "alex_c_2024-01-03_tracked.csv",
        "Movement,Reps\nSquat,5\n",
    );

    let trends = analyze_athlete(&env.resources.store, "alex").await.unwrap();
    assert_eq!(trends["Squat"].len(), 1);
    assert!((trends["Squat"][0].max_weight - 210.0).abs() < f64::EPSILON);
    assert!((trends["Squat"][0].total_volume - 2050.0).abs() < f64::EPSILON);
    assert_eq!(trends.len(), 2);
}

#[tokio::test]
async fn analysis_of_athlete_without_records_is_empty() {
    let env = create_test_env().await;
    assert!(analyze_athlete(&env.resources.store, "nobody")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn history_returns_latest_file_containing_the_exercise() {
    let env = create_test_env().await;
    env.put(
        WorkoutStage::Finished,
        "alex_a_2024-01-01_tracked.csv",
        "Exercise,Actual Reps,Actual Weight (lb)\nBench Press,8,135\n",
    );
    env.put(
        WorkoutStage::Finished,
        "alex_b_2024-02-01_tracked.csv",
        "Exercise,Actual Reps,Actual Weight (lb)\nSquat,5,225\nsquat,3,245\n",
    );

    let history = latest_exercise_performance(&env.resources.store, "alex", "SQUAT")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(history.date.as_deref(), Some("2024-02-01"));
    assert_eq!(history.sets.len(), 2);
    assert!((history.sets[1].weight - 245.0).abs() < f64::EPSILON);

    let older = latest_exercise_performance(&env.resources.store, "alex", "bench press")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(older.date.as_deref(), Some("2024-01-01"));
}

#[tokio::test]
async fn history_prefers_dated_files_over_undated_ones() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Finished, "alex_z_undated_tracked.csv", SQUAT_BENCH_CSV);
    env.put(WorkoutStage::Finished, "alex_a_2023-06-01_tracked.csv", SQUAT_BENCH_CSV);

    let history = latest_exercise_performance(&env.resources.store, "alex", "Squat")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(history.date.as_deref(), Some("2023-06-01"));
}

#[tokio::test]
async fn history_without_records_is_none() {
    let env = create_test_env().await;
    assert!(latest_exercise_performance(&env.resources.store, "alex", "Squat")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn catalog_rejects_case_insensitive_duplicates_and_stays_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ExerciseCatalog::new(dir.path().join("api").join("exercises.csv"));
    assert!(catalog.list().await.unwrap().is_empty());

    catalog.add("Squat").await.unwrap();
    let err = catalog.add("squat").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    catalog.add("  Bench Press ").await.unwrap();
    catalog.add("deadlift").await.unwrap();
    assert_eq!(
        catalog.list().await.unwrap(),
        ["Bench Press", "deadlift", "Squat"]
    );

    let on_disk = std::fs::read_to_string(catalog.path()).unwrap();
    assert_eq!(on_disk, "Exercise\nBench Press\ndeadlift\nSquat\n");
}

#[tokio::test]
async fn catalog_rejects_empty_names() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = ExerciseCatalog::new(dir.path().join("exercises.csv"));
    let err = catalog.add("   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(!catalog.path().exists());
}
