// ABOUTME: Integration tests for the workout, analysis and catalog route handlers
// ABOUTME: Tests ownership checks, status codes, downloads and completion notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::Router;
use common::{create_test_env, create_test_env_with, RecordingNotifier, TestEnv, SQUAT_BENCH_CSV};
use coachbook::models::WorkoutStage;
use coachbook::server::build_router;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn router(env: &TestEnv) -> Router {
    build_router(env.resources.clone())
}

// ============================================================================
// Authentication and authorization
// ============================================================================

#[tokio::test]
async fn requests_without_a_session_are_unauthorized() {
    let env = create_test_env().await;
    let response = AxumTestRequest::get("/api/list_workouts_for_tracker")
        .send(router(&env))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn athlete_cannot_view_another_athletes_data() {
    let env = create_test_env().await;
    let alex = env.athlete_bearer("alex");

    for uri in [
        "/api/list_workouts_for_tracker?user=sam",
        "/api/mesocycle_view?user=sam",
        "/api/get_analysis?user=sam",
        "/api/list_templates?user=sam",
        "/api/get_exercise_history?user=sam&exercise=Squat",
    ] {
        let response = AxumTestRequest::get(uri)
            .header("authorization", &alex)
            .send(router(&env))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn coach_is_never_denied_for_any_owner() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Planned, "sam_legs_2024-05-01.csv", "Exercise\nSquat\n");
    let coach = env.coach_bearer();

    for uri in [
        "/api/list_workouts_for_tracker?user=sam",
        "/api/mesocycle_view?user=sam",
        "/api/get_analysis?user=sam",
        "/api/list_templates?user=sam",
        "/api/get_exercise_history?user=sam&exercise=Squat",
        "/api/get_workout?filename=sam_legs_2024-05-01.csv&type=plan",
    ] {
        let response = AxumTestRequest::get(uri)
            .header("authorization", &coach)
            .send(router(&env))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn athlete_cannot_save_into_another_athletes_name() {
    let env = create_test_env().await;
    let response = AxumTestRequest::post("/api/save_plan")
        .header("authorization", &env.athlete_bearer("alex"))
        .json(&json!({ "filename": "sam_push_2024-05-01.csv", "csv_content": "Exercise\n" }))
        .send(router(&env))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(!env.exists(WorkoutStage::Planned, "sam_push_2024-05-01.csv"));
}

#[tokio::test]
async fn coach_only_endpoints_reject_athletes() {
    let env = create_test_env().await;
    let alex = env.athlete_bearer("alex");

    let athletes = AxumTestRequest::get("/api/get_athletes")
        .header("authorization", &alex)
        .send(router(&env))
        .await;
    assert_eq!(athletes.status_code(), StatusCode::FORBIDDEN);

    let add = AxumTestRequest::post("/api/add_exercise")
        .header("authorization", &alex)
        .json(&json!({ "exercise": "Dip" }))
        .send(router(&env))
        .await;
    assert_eq!(add.status_code(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn plan_progress_complete_round_trip() {
    let env = create_test_env_with(RecordingNotifier::default()).await;
    env.put_contacts("name,email\nalex,alex@example.com\n");
    let alex = env.athlete_bearer("alex");

    let saved = AxumTestRequest::post("/api/save_plan")
        .header("authorization", &env.coach_bearer())
        .json(&json!({ "filename": "alex_push_2024-05-01.csv", "csv_content": "Exercise\nSquat\n" }))
        .send(router(&env))
        .await;
    assert_eq!(saved.status_code(), StatusCode::OK);

    let progress = AxumTestRequest::post("/api/save_progress")
        .header("authorization", &alex)
        .json(&json!({
            "filename": "alex_push_2024-05-01_tracked.csv",
            "csv_content": "Exercise,Actual Reps\nSquat,5\n",
        }))
        .send(router(&env))
        .await;
    assert_eq!(progress.status_code(), StatusCode::OK);

    let listing: Value = AxumTestRequest::get("/api/list_workouts_for_tracker")
        .header("authorization", &alex)
        .send(router(&env))
        .await
        .json();
    assert_eq!(listing["plans"], json!([]));
    assert_eq!(listing["tracked"], json!(["alex_push_2024-05-01_tracked.csv"]));

    let completed = AxumTestRequest::post("/api/complete_workout")
        .header("authorization", &alex)
        .json(&json!({
            "plan_filename": "alex_push_2024-05-01.csv",
            "tracked_filename": "alex_push_2024-05-01_tracked.csv",
            "csv_content": SQUAT_BENCH_CSV,
        }))
        .send(router(&env))
        .await;
    assert_eq!(completed.status_code(), StatusCode::OK);
    assert!(env.exists(WorkoutStage::Finished, "alex_push_2024-05-01_tracked.csv"));
    assert!(!env.exists(WorkoutStage::Planned, "alex_push_2024-05-01.csv"));
    assert!(!env.exists(WorkoutStage::InProgress, "alex_push_2024-05-01_tracked.csv"));

    // notification is dispatched in the background
    let mut sent = Vec::new();
    for _ in 0..50 {
        sent = env.notifier.sent();
        if !sent.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alex@example.com");
}

#[tokio::test]
async fn completion_succeeds_when_notification_fails() {
    let env = create_test_env_with(RecordingNotifier::failing()).await;
    env.put_contacts("name,email\nalex,alex@example.com\n");

    let completed = AxumTestRequest::post("/api/complete_workout")
        .header("authorization", &env.athlete_bearer("alex"))
        .json(&json!({
            "plan_filename": "alex_push_2024-05-01.csv",
            "tracked_filename": "alex_push_2024-05-01_tracked.csv",
            "csv_content": SQUAT_BENCH_CSV,
        }))
        .send(router(&env))
        .await;
    assert_eq!(completed.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn completion_checks_ownership_of_the_plan_name_too() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Planned, "sam_push_2024-05-01.csv", "Exercise\n");

    let response = AxumTestRequest::post("/api/complete_workout")
        .header("authorization", &env.athlete_bearer("alex"))
        .json(&json!({
            "plan_filename": "sam_push_2024-05-01.csv",
            "tracked_filename": "alex_push_2024-05-01_tracked.csv",
            "csv_content": SQUAT_BENCH_CSV,
        }))
        .send(router(&env))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(env.exists(WorkoutStage::Planned, "sam_push_2024-05-01.csv"));
}

#[tokio::test]
async fn delete_plan_status_codes() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Planned, "alex_push_2024-05-01.csv", "Exercise\n");
    let alex = env.athlete_bearer("alex");

    let deleted = AxumTestRequest::post("/api/delete_plan")
        .header("authorization", &alex)
        .json(&json!({ "filename": "alex_push_2024-05-01.csv" }))
        .send(router(&env))
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let again = AxumTestRequest::post("/api/delete_plan")
        .header("authorization", &alex)
        .json(&json!({ "filename": "alex_push_2024-05-01.csv" }))
        .send(router(&env))
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_workout_downloads_csv_and_maps_errors() {
    let env = create_test_env().await;
    env.put(
        WorkoutStage::Finished,
        "alex_push_2024-05-01_tracked.csv",
        SQUAT_BENCH_CSV,
    );
    let alex = env.athlete_bearer("alex");

    let download = AxumTestRequest::get(
        "/api/get_workout?filename=alex_push_2024-05-01_tracked.csv&type=finished",
    )
    .header("authorization", &alex)
    .send(router(&env))
    .await;
    assert_eq!(download.status_code(), StatusCode::OK);
    assert_eq!(download.text(), SQUAT_BENCH_CSV);
    let disposition = download.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment"));

    let bad_type = AxumTestRequest::get(
        "/api/get_workout?filename=alex_push_2024-05-01_tracked.csv&type=archive",
    )
    .header("authorization", &alex)
    .send(router(&env))
    .await;
    assert_eq!(bad_type.status_code(), StatusCode::BAD_REQUEST);

    let missing = AxumTestRequest::get(
        "/api/get_workout?filename=alex_push_2024-05-01_tracked.csv&type=tracked",
    )
    .header("authorization", &alex)
    .send(router(&env))
    .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let traversal = AxumTestRequest::get("/api/get_workout?filename=../alex_x.csv&type=plan")
        .header("authorization", &env.coach_bearer())
        .send(router(&env))
        .await;
    assert_eq!(traversal.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quoted_filenames_are_rejected_before_reaching_headers() {
    let env = create_test_env().await;
    let coach = env.coach_bearer();

    let saved = AxumTestRequest::post("/api/save_plan")
        .header("authorization", &coach)
        .json(&json!({ "filename": "alex_\"push\"_2024-05-01.csv", "csv_content": "Exercise\n" }))
        .send(router(&env))
        .await;
    assert_eq!(saved.status_code(), StatusCode::BAD_REQUEST);

    let download = AxumTestRequest::get("/api/get_workout?filename=alex_%22push%22_2024-05-01.csv&type=plan")
        .header("authorization", &coach)
        .send(router(&env))
        .await;
    assert_eq!(download.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Analysis and history
// ============================================================================

#[tokio::test]
async fn exercise_history_requires_user_and_exercise() {
    let env = create_test_env().await;
    let response = AxumTestRequest::get("/api/get_exercise_history?exercise=Squat")
        .header("authorization", &env.athlete_bearer("alex"))
        .send(router(&env))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exercise_history_without_records_is_null_not_error() {
    let env = create_test_env().await;
    let response = AxumTestRequest::get("/api/get_exercise_history?user=alex&exercise=Squat")
        .header("authorization", &env.athlete_bearer("alex"))
        .send(router(&env))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["history"], Value::Null);
}

#[tokio::test]
async fn analysis_defaults_to_the_caller() {
    let env = create_test_env().await;
    env.put(
        WorkoutStage::Finished,
        "alex_push_2024-05-01_tracked.csv",
        SQUAT_BENCH_CSV,
    );
    let body: Value = AxumTestRequest::get("/api/get_analysis")
        .header("authorization", &env.athlete_bearer("alex"))
        .send(router(&env))
        .await
        .json();
    assert_eq!(body["analysis"]["Squat"][0]["date"], "2024-05-01");
    assert_eq!(body["analysis"]["Squat"][0]["max_weight"], 210.0);
}

// ============================================================================
// Catalog and athletes
// ============================================================================

#[tokio::test]
async fn add_exercise_status_codes() {
    let env = create_test_env().await;
    let coach = env.coach_bearer();

    let created = AxumTestRequest::post("/api/add_exercise")
        .header("authorization", &coach)
        .json(&json!({ "exercise": "Squat" }))
        .send(router(&env))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let duplicate = AxumTestRequest::post("/api/add_exercise")
        .header("authorization", &coach)
        .json(&json!({ "exercise": "squat" }))
        .send(router(&env))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let empty = AxumTestRequest::post("/api/add_exercise")
        .header("authorization", &coach)
        .json(&json!({ "exercise": "  " }))
        .send(router(&env))
        .await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let listed: Value = AxumTestRequest::get("/api/get_exercises")
        .header("authorization", &env.athlete_bearer("alex"))
        .send(router(&env))
        .await
        .json();
    assert_eq!(listed["exercises"], json!(["Squat"]));
}

#[tokio::test]
async fn coach_lists_athletes() {
    let env = create_test_env().await;
    env.put(WorkoutStage::Planned, "sam_a_2024-01-01.csv", "Exercise\n");
    env.put(WorkoutStage::Finished, "alex_a_2024-01-01_tracked.csv", "Exercise\n");

    let body: Value = AxumTestRequest::get("/api/get_athletes")
        .header("authorization", &env.coach_bearer())
        .send(router(&env))
        .await
        .json();
    assert_eq!(body["athletes"], json!(["alex", "sam"]));
}
