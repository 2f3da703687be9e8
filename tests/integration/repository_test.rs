// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_user, test_db};
use scrapegate::domain::models::scraping_job::{JobStatus, ScrapingJob};
use scrapegate::domain::repositories::article_repository::ArticleRepository;
use scrapegate::domain::repositories::scraping_job_repository::{
    RepositoryError, ScrapingJobRepository,
};
use scrapegate::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use scrapegate::infrastructure::repositories::scraping_job_repo_impl::ScrapingJobRepositoryImpl;
use serde_json::json;

#[tokio::test]
async fn test_total_comments_beyond_column_range_is_rejected() {
    let db = test_db().await;
    let user = create_user(&db, "alice").await;
    let articles = ArticleRepositoryImpl::new(db);
    let article = articles
        .find_or_create("https://example.com/a", "A", user.id)
        .await
        .unwrap();

    // When: 上游报告的总数超出 INTEGER 范围
    let err = articles
        .update_total_comments(article.id, u32::MAX)
        .await
        .unwrap_err();

    // Then: 报错且原值保持不变
    assert!(matches!(
        err,
        RepositoryError::OutOfRange {
            field: "total_comments",
            value: u32::MAX
        }
    ));
    let stored = articles.find_by_id(article.id).await.unwrap().unwrap();
    assert_eq!(stored.total_comments, 0);

    let updated = articles
        .update_total_comments(article.id, i32::MAX as u32)
        .await
        .unwrap();
    assert_eq!(updated.total_comments, i32::MAX as u32);
}

#[tokio::test]
async fn test_job_counts_beyond_column_range_are_rejected() {
    let db = test_db().await;
    let user = create_user(&db, "alice").await;
    let repo = ScrapingJobRepositoryImpl::new(db);
    let job = repo
        .create(&ScrapingJob::new(
            user.id,
            "https://example.com/a".to_string(),
            json!({}),
        ))
        .await
        .unwrap();

    let running = job.clone().start().unwrap();
    let overflowing = running.clone().update_progress(1, u32::MAX).unwrap();

    let err = repo
        .compare_and_swap(&overflowing, JobStatus::Pending, job.version)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::OutOfRange {
            field: "comments_found",
            ..
        }
    ));

    // 记录未被修改
    let stored = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Pending);
    assert_eq!(stored.version, job.version);
}
