// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mock_scrape_comments, TestApp};
use axum::http::StatusCode;
use scrapegate::domain::models::scraping_job::JobStatus;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const URL: &str = "https://example.com/a";

#[tokio::test]
async fn test_cache_miss_scrapes_upstream_and_completes_job() {
    let app = TestApp::spawn().await;

    // Given: 上游返回两条评论
    Mock::given(method("POST"))
        .and(path("/scrape-comments"))
        .and(body_json(json!({ "url": URL })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "comments": ["x", "y"], "total_comments": 2 })),
        )
        .expect(1)
        .mount(&app.upstream)
        .await;

    // When: 第一次抓取
    let response = app.scrape("alice", URL).await;

    // Then: 任务完成，评论已保存，缓存已写入
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Comments scraped and saved successfully");
    assert_eq!(body["totalComments"], 2);
    assert_eq!(body["article"]["url"], URL);
    assert_eq!(body["article"]["totalComments"], 2);

    let contents: Vec<&str> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["x", "y"]);

    let job = &body["job"];
    assert_eq!(job["status"], "COMPLETED");
    assert_eq!(job["commentsFound"], 2);
    assert_eq!(job["pagesScraped"], 1);
    assert_eq!(job["targetUrl"], URL);
    assert!(job["startTime"].is_string());
    assert!(job["endTime"].is_string());

    assert!(app.state.cache.has(URL).await);
    assert!(app.state.cache.remaining_ttl(URL).await > 0);
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let app = TestApp::spawn().await;

    // Given: 上游只允许被调用一次
    mock_scrape_comments(&app.upstream, &["x", "y"], 2, 1).await;

    let first = app.scrape("alice", URL).await;
    assert_eq!(first.status_code(), StatusCode::OK);

    // When: TTL 内再次请求
    let second = app.scrape("alice", URL).await;

    // Then: 新任务同样完成，数据来自缓存，评论不重复
    assert_eq!(second.status_code(), StatusCode::OK);
    let first: Value = first.json();
    let second: Value = second.json();

    assert_ne!(first["job"]["id"], second["job"]["id"]);
    assert_eq!(second["job"]["status"], "COMPLETED");
    assert_eq!(second["job"]["commentsFound"], 2);
    assert_eq!(second["totalComments"], 2);
    assert_eq!(first["article"]["id"], second["article"]["id"]);
    let ids = |body: &Value| -> Vec<Value> {
        body["comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].clone())
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[tokio::test]
async fn test_upstream_timeout_fails_job_and_returns_error() {
    let app = TestApp::spawn().await;

    // Given: 上游响应慢于读取超时（1秒）
    Mock::given(method("POST"))
        .and(path("/scrape-comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "comments": ["late"], "total_comments": 1 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&app.upstream)
        .await;

    // When
    let response = app.scrape("alice", URL).await;

    // Then: 调用方得到错误，任务失败并记录超时信息
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to scrape comments:"));
    assert!(message.contains("timed out"));

    let failed = app
        .server
        .get("/jobs")
        .add_query_param("status", "FAILED")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json::<Value>();
    assert_eq!(failed["totalJobs"], 1);
    let job = &failed["scrapingJobs"][0];
    assert_eq!(job["status"], JobStatus::Failed.as_str());
    assert!(job["errors"].as_str().unwrap().contains("timed out"));
    assert!(job["endTime"].is_string());

    // 失败的抓取不写缓存
    assert!(!app.state.cache.has(URL).await);
}

#[tokio::test]
async fn test_malformed_upstream_response_fails_job() {
    let app = TestApp::spawn().await;

    // Given: 上游缺少 total_comments
    Mock::given(method("POST"))
        .and(path("/scrape-comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": ["x"] })))
        .mount(&app.upstream)
        .await;

    let response = app.scrape("alice", URL).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let jobs = app
        .server
        .get("/jobs")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json::<Value>();
    assert_eq!(jobs["scrapingJobs"][0]["status"], "FAILED");
    assert!(!app.state.cache.has(URL).await);
}

#[tokio::test]
async fn test_upstream_error_status_fails_job() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/scrape-comments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&app.upstream)
        .await;

    let response = app.scrape("alice", URL).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let jobs = app
        .server
        .get("/jobs")
        .add_query_param("status", "failed")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json::<Value>();
    assert_eq!(jobs["totalJobs"], 1);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_before_any_job_is_created() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/scrape")
        .add_header("Authorization", app.bearer("alice"))
        .json(&json!({ "url": "not a url", "title": "t" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["status"], "error");

    let jobs = app
        .server
        .get("/jobs")
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json::<Value>();
    assert_eq!(jobs["totalJobs"], 0);
}

#[tokio::test]
async fn test_url_is_trimmed_before_caching() {
    let app = TestApp::spawn().await;
    mock_scrape_comments(&app.upstream, &["x"], 1, 1).await;

    let response = app.scrape("alice", "  https://example.com/a  ").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["job"]["targetUrl"], URL);
    assert!(app.state.cache.has(URL).await);
}

#[tokio::test]
async fn test_cache_hit_after_rescrape_reports_cached_comments() {
    let app = TestApp::spawn().await;

    // Given: 第一次抓取得到两条评论，随后清除缓存
    mock_scrape_comments(&app.upstream, &["x", "y"], 2, 1).await;
    assert_eq!(app.scrape("alice", URL).await.status_code(), StatusCode::OK);
    app.state.cache.clear(URL).await;

    // 上游内容变化后再次抓取，写入新的缓存
    app.upstream.reset().await;
    mock_scrape_comments(&app.upstream, &["p", "q", "r"], 3, 1).await;
    let rescraped = app.scrape("alice", URL).await;
    assert_eq!(rescraped.status_code(), StatusCode::OK);
    let rescraped: Value = rescraped.json();

    // When: 缓存命中
    let hit = app.scrape("alice", URL).await;

    // Then: 结果只包含缓存中的评论，并复用第二次抓取保存的记录
    assert_eq!(hit.status_code(), StatusCode::OK);
    let hit: Value = hit.json();
    let contents: Vec<&str> = hit["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["p", "q", "r"]);
    assert_eq!(hit["totalComments"], 3);
    assert_eq!(hit["job"]["commentsFound"], 3);
    assert_eq!(hit["comments"][0]["id"], rescraped["comments"][0]["id"]);
    assert_eq!(hit["comments"][2]["id"], rescraped["comments"][2]["id"]);
}
