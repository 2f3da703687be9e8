// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mock_scrape_comments, TestApp};
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

async fn completed_job_id(app: &TestApp, subject: &str) -> String {
    mock_scrape_comments(&app.upstream, &["x", "y"], 2, 1).await;
    let body: Value = app.scrape(subject, "https://example.com/a").await.json();
    body["job"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_cancel_completed_job_is_rejected_and_record_unchanged() {
    let app = TestApp::spawn().await;
    let job_id = completed_job_id(&app, "alice").await;

    let before: Value = app
        .server
        .get(&format!("/jobs/{}", job_id))
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();

    // When: 取消已完成的任务
    let response = app
        .server
        .put(&format!("/jobs/{}/cancel", job_id))
        .add_header("Authorization", app.bearer("alice"))
        .await;

    // Then: 400，记录保持不变
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Cannot cancel job in COMPLETED state");

    let after: Value = app
        .server
        .get(&format!("/jobs/{}", job_id))
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(before["scrapingJob"], after["scrapingJob"]);
    assert_eq!(after["scrapingJob"]["status"], "COMPLETED");
}

#[tokio::test]
async fn test_cancel_pending_job_records_reason() {
    let app = TestApp::spawn().await;
    let user = super::helpers::create_user(&app.db, "alice").await;
    let job = app
        .state
        .jobs
        .create(user.id, "https://example.com/b", json!({}))
        .await
        .unwrap();

    let response = app
        .server
        .put(&format!("/jobs/{}/cancel", job.id))
        .add_query_param("reason", "no longer needed")
        .add_header("Authorization", app.bearer("alice"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Scraping job cancelled successfully");
    assert_eq!(body["scrapingJob"]["status"], "CANCELLED");
    assert_eq!(body["scrapingJob"]["errors"], "no longer needed");
}

#[tokio::test]
async fn test_get_job_checks_existence_and_ownership() {
    let app = TestApp::spawn().await;
    let job_id = completed_job_id(&app, "alice").await;

    let own = app
        .server
        .get(&format!("/jobs/{}", job_id))
        .add_header("Authorization", app.bearer("alice"))
        .await;
    assert_eq!(own.status_code(), StatusCode::OK);
    let own: Value = own.json();
    assert_eq!(own["message"], "Scraping job retrieved successfully");
    assert_eq!(own["scrapingJob"]["id"], job_id.as_str());

    let foreign = app
        .server
        .get(&format!("/jobs/{}", job_id))
        .add_header("Authorization", app.bearer("mallory"))
        .await;
    assert_eq!(foreign.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        foreign.json::<Value>()["message"],
        "Access denied - Job belongs to another user"
    );

    let missing_id = Uuid::new_v4();
    let missing = app
        .server
        .get(&format!("/jobs/{}", missing_id))
        .add_header("Authorization", app.bearer("alice"))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        missing.json::<Value>()["message"],
        format!("Scraping job not found with ID: {}", missing_id)
    );
}

#[tokio::test]
async fn test_foreign_job_cannot_be_cancelled() {
    let app = TestApp::spawn().await;
    let owner = super::helpers::create_user(&app.db, "alice").await;
    let job = app
        .state
        .jobs
        .create(owner.id, "https://example.com/c", json!({}))
        .await
        .unwrap();

    let response = app
        .server
        .put(&format!("/jobs/{}/cancel", job.id))
        .add_header("Authorization", app.bearer("mallory"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let unchanged = app.state.jobs.get(job.id).await.unwrap();
    assert_eq!(unchanged.status, job.status);
    assert_eq!(unchanged.version, job.version);
}

#[tokio::test]
async fn test_list_jobs_filters_by_owner_and_status() {
    let app = TestApp::spawn().await;
    completed_job_id(&app, "alice").await;

    let alice = super::helpers::create_user(&app.db, "alice").await;
    app.state
        .jobs
        .create(alice.id, "https://example.com/pending", json!({}))
        .await
        .unwrap();

    let all: Value = app
        .server
        .get("/jobs")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(all["message"], "Scraping jobs retrieved successfully");
    assert_eq!(all["totalJobs"], 2);

    let completed: Value = app
        .server
        .get("/jobs")
        .add_query_param("status", "COMPLETED")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(completed["totalJobs"], 1);
    assert_eq!(completed["scrapingJobs"][0]["status"], "COMPLETED");

    let others: Value = app
        .server
        .get("/jobs")
        .add_header("Authorization", app.bearer("bob"))
        .await
        .json();
    assert_eq!(others["totalJobs"], 0);
}

#[tokio::test]
async fn test_unknown_status_filter_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get("/jobs")
        .add_query_param("status", "SLEEPING")
        .add_header("Authorization", app.bearer("alice"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Invalid job status: SLEEPING"
    );
}
