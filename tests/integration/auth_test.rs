// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{TestApp, ISSUER};
use axum::http::StatusCode;
use scrapegate::domain::models::user::UserProfile;
use scrapegate::infrastructure::auth::jwt::JwtVerifier;
use serde_json::Value;

#[tokio::test]
async fn test_public_endpoints_need_no_token() {
    let app = TestApp::spawn().await;

    let health = app.server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "OK");

    let status: Value = app.server.get("/status").await.json();
    assert_eq!(status["status"], "UP");
    assert_eq!(status["application"], "scrapegate");
    assert!(status["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found_without_token() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/jobs").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing bearer token");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::spawn().await;
    let forged = JwtVerifier::new("another-secret", ISSUER, None)
        .issue(&UserProfile::default(), chrono::Duration::minutes(5))
        .unwrap();

    let response = app
        .server
        .get("/jobs")
        .add_header("Authorization", format!("Bearer {}", forged))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    let expired = JwtVerifier::new(super::helpers::JWT_SECRET, ISSUER, None)
        .issue(
            &UserProfile {
                subject: "alice".to_string(),
                ..Default::default()
            },
            chrono::Duration::minutes(-10),
        )
        .unwrap();

    let response = app
        .server
        .get("/users/me")
        .add_header("Authorization", format!("Bearer {}", expired))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_first_request_provisions_user_once() {
    let app = TestApp::spawn().await;

    let first: Value = app
        .server
        .get("/users/me")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    let second: Value = app
        .server
        .get("/users/me")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();

    assert_eq!(first["status"], "success");
    assert_eq!(first["user"]["keycloakId"], "alice");
    assert_eq!(first["user"]["email"], "alice@example.com");
    assert_eq!(first["user"]["id"], second["user"]["id"]);
}
