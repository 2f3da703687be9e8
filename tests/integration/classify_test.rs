// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mock_scrape_comments, TestApp};
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn first_comment_id(app: &TestApp) -> String {
    mock_scrape_comments(&app.upstream, &["great read"], 1, 1).await;
    let body: Value = app.scrape("alice", "https://example.com/a").await.json();
    body["comments"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_classify_with_labelled_results() {
    let app = TestApp::spawn().await;
    let comment_id = first_comment_id(&app).await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(body_json(json!({ "comment": "great read" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "POSITIVE",
            "results": [
                { "label": "POSITIVE", "score": 0.9 },
                { "label": "NEGATIVE", "score": 0.04 },
                { "label": "NEUTRAL", "score": 0.06 }
            ]
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/comments/classify")
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({ "commentId": comment_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Comment sentiment analysis completed successfully"
    );
    assert_eq!(body["comment"]["sentiment"], "POSITIVE");
    assert_eq!(body["comment"]["isProcessed"], true);
    assert_eq!(body["comment"]["confidenceScore"], 0.9);

    let result = &body["sentimentAnalysisResult"];
    assert_eq!(result["commentId"], comment_id.as_str());
    assert_eq!(result["modelName"], "default_model");
    assert_eq!(result["sentiment"], "POSITIVE");
    assert_eq!(result["positiveScore"], 0.9);
    assert_eq!(result["negativeScore"], 0.04);
    assert_eq!(result["neutralScore"], 0.06);
}

#[tokio::test]
async fn test_classify_with_flat_scores_and_model_name() {
    let app = TestApp::spawn().await;
    let comment_id = first_comment_id(&app).await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "negative",
            "confidence_score": 0.7,
            "positive_score": 0.1,
            "negative_score": 0.7,
            "neutral_score": 0.2
        })))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/comments/classify")
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({ "commentId": comment_id, "modelName": "distilbert" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["comment"]["sentiment"], "NEGATIVE");
    assert_eq!(body["sentimentAnalysisResult"]["modelName"], "distilbert");
    assert_eq!(body["sentimentAnalysisResult"]["confidenceScore"], 0.7);
}

#[tokio::test]
async fn test_classify_unknown_comment_is_not_found() {
    let app = TestApp::spawn().await;
    let missing = Uuid::new_v4();

    let response = app
        .server
        .post("/comments/classify")
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({ "commentId": missing }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        format!("Comment not found with ID: {}", missing)
    );
}

#[tokio::test]
async fn test_classify_unparseable_response_is_server_error() {
    let app = TestApp::spawn().await;
    let comment_id = first_comment_id(&app).await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "?" })))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .post("/comments/classify")
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({ "commentId": comment_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to analyze comment sentiment:"));
}
