// ABOUTME: Integration tests for login, logout, current-user and health routes
// ABOUTME: Verifies the session cookie round trip and credential rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::{header, StatusCode};
use common::{create_test_env, COACH_PASSWORD};
use coachbook::server::build_router;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn form_login_sets_a_cookie_that_authenticates() {
    let env = create_test_env().await;

    let login = AxumTestRequest::post("/login")
        .form(&format!("username=coach&password={COACH_PASSWORD}"))
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);

    let set_cookie = login.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_owned();

    let me: Value = AxumTestRequest::get("/api/get_current_user")
        .header("cookie", &cookie)
        .send(build_router(env.resources.clone()))
        .await
        .json();
    assert_eq!(me["username"], "coach");
    assert_eq!(me["role"], "coach");
}

#[tokio::test]
async fn json_login_returns_a_bearer_token() {
    let env = create_test_env().await;

    let body: Value = AxumTestRequest::post("/login")
        .json(&json!({ "username": "coach", "password": COACH_PASSWORD }))
        .send(build_router(env.resources.clone()))
        .await
        .json();
    let token = body["token"].as_str().unwrap();

    let response = AxumTestRequest::get("/api/get_athletes")
        .header("authorization", &format!("Bearer {token}"))
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let env = create_test_env().await;
    let response = AxumTestRequest::post("/login")
        .form("username=coach&password=nope")
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let env = create_test_env().await;
    let mut bearer = env.athlete_bearer("alex");
    bearer.push('x');
    let response = AxumTestRequest::get("/api/get_current_user")
        .header("authorization", &bearer)
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let env = create_test_env().await;
    let response = AxumTestRequest::post("/logout")
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn health_reports_prepared_directories() {
    let env = create_test_env().await;
    let response = AxumTestRequest::get("/health")
        .send(build_router(env.resources.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"]["name"], "coachbook");
}

#[tokio::test]
async fn requests_get_a_request_id() {
    let env = create_test_env().await;
    let response = AxumTestRequest::get("/health")
        .send(build_router(env.resources.clone()))
        .await;
    assert!(response.headers().contains_key("x-request-id"));
}
