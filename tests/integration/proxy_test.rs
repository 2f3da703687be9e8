// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;
use serde_json::Value;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_passthrough_preserves_status_headers_and_body() {
    let app = TestApp::spawn().await;

    // Given: 上游对特定请求返回非 2xx
    Mock::given(method("PATCH"))
        .and(path("/models/sentiment"))
        .and(query_param("version", "2"))
        .and(header("x-request-id", "abc-123"))
        .and(body_string("raw payload"))
        .respond_with(
            ResponseTemplate::new(418)
                .insert_header("x-upstream", "yes")
                .set_body_string("i am a teapot"),
        )
        .expect(1)
        .mount(&app.upstream)
        .await;

    // When
    let response = app
        .server
        .method(
            axum::http::Method::PATCH,
            "/proxy/models/sentiment?version=2",
        )
        .add_header("Authorization", app.bearer("alice"))
        .add_header("x-request-id", "abc-123")
        .text("raw payload")
        .await;

    // Then: 状态码、响应头和响应体原样返回
    assert_eq!(response.status_code(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.header("x-upstream"), "yes");
    assert_eq!(response.text(), "i am a teapot");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let app = TestApp::spawn_with(|settings| {
        settings.upstream.base_url = "http://127.0.0.1:1".to_string();
    })
    .await;

    let response = app
        .server
        .get("/proxy/health")
        .add_header("Authorization", app.bearer("alice"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["status"], "error");
}

#[tokio::test]
async fn test_proxy_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/proxy/health").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
