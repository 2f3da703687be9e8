// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{mock_scrape_comments, test_db, TestApp};
use axum::http::StatusCode;
use scrapegate::domain::models::scraped_comments::{ScrapeResult, ScrapedComments};
use scrapegate::infrastructure::cache::database_backend::DatabaseCacheBackend;
use scrapegate::infrastructure::cache::scrape_cache::{ScrapeCache, NO_TTL};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const URL: &str = "https://example.com/a";

fn sample() -> ScrapedComments {
    ScrapedComments::new(
        URL,
        &ScrapeResult {
            comments: vec!["x".to_string(), "y".to_string()],
            total_comments: 2,
        },
    )
}

#[tokio::test]
async fn test_database_backend_round_trip_and_expiry() {
    let db = test_db().await;
    let backend = Arc::new(DatabaseCacheBackend::new(db));
    let cache = ScrapeCache::new(backend.clone(), "scraping", Duration::from_secs(60));

    // Given: 短有效期的条目
    let value = sample();
    cache.put(URL, &value, Duration::from_millis(500)).await;
    assert_eq!(cache.get(URL).await, Some(value));
    assert!(cache.remaining_ttl(URL).await >= 0);

    // When: 超过有效期
    tokio::time::sleep(Duration::from_millis(800)).await;

    // Then: 视为不存在，清理后表中也不再保留
    assert_eq!(cache.get(URL).await, None);
    assert!(!cache.has(URL).await);
    assert_eq!(cache.remaining_ttl(URL).await, NO_TTL);
    assert_eq!(backend.purge_expired().await.unwrap(), 1);
}

#[tokio::test]
async fn test_database_backend_overwrites_existing_entry() {
    let db = test_db().await;
    let cache = ScrapeCache::new(
        Arc::new(DatabaseCacheBackend::new(db)),
        "scraping",
        Duration::from_secs(60),
    );

    cache.put(URL, &sample(), Duration::from_secs(60)).await;
    let replacement = ScrapedComments::new(
        URL,
        &ScrapeResult {
            comments: vec!["z".to_string()],
            total_comments: 9,
        },
    );
    cache.put(URL, &replacement, Duration::from_secs(60)).await;

    assert_eq!(cache.get(URL).await, Some(replacement));

    cache.clear(URL).await;
    cache.clear(URL).await;
    assert!(!cache.has(URL).await);
}

#[tokio::test]
async fn test_cache_endpoints_report_and_clear_entries() {
    let app = TestApp::spawn().await;

    // 清除后再次抓取会重新访问上游
    mock_scrape_comments(&app.upstream, &["x"], 1, 2).await;
    app.scrape("alice", URL).await;

    let status: Value = app
        .server
        .get("/cache")
        .add_query_param("url", URL)
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(status["url"], URL);
    assert_eq!(status["cached"], true);
    assert!(status["remainingTtl"].as_i64().unwrap() > 0);

    let cleared = app
        .server
        .delete("/cache")
        .add_query_param("url", URL)
        .add_header("Authorization", app.bearer("alice"))
        .await;
    assert_eq!(cleared.status_code(), StatusCode::OK);

    let status: Value = app
        .server
        .get("/cache")
        .add_query_param("url", URL)
        .add_header("Authorization", app.bearer("alice"))
        .await
        .json();
    assert_eq!(status["cached"], false);
    assert_eq!(status["remainingTtl"], NO_TTL);

    let rescrape = app.scrape("alice", URL).await;
    assert_eq!(rescrape.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_cache_endpoint_requires_url() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get("/cache")
        .add_header("Authorization", app.bearer("alice"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
