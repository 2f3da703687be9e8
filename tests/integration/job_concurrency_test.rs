// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_user, test_db};
use scrapegate::domain::models::scraping_job::JobStatus;
use scrapegate::domain::repositories::scraping_job_repository::{
    RepositoryError, ScrapingJobRepository,
};
use scrapegate::domain::services::job_tracker::{JobError, JobTracker};
use scrapegate::infrastructure::repositories::scraping_job_repo_impl::ScrapingJobRepositoryImpl;
use serde_json::json;
use std::sync::Arc;

async fn running_job() -> (JobTracker, Arc<ScrapingJobRepositoryImpl>, uuid::Uuid) {
    let db = test_db().await;
    let user = create_user(&db, "alice").await;
    let repo = Arc::new(ScrapingJobRepositoryImpl::new(db));
    let tracker = JobTracker::new(repo.clone());

    let job = tracker
        .create(user.id, "https://example.com/a", json!({ "title": "A" }))
        .await
        .unwrap();
    tracker.start(job.id).await.unwrap();
    (tracker, repo, job.id)
}

#[tokio::test]
async fn test_concurrent_completes_yield_exactly_one_winner() {
    let (tracker, _repo, id) = running_job().await;

    // When: 同一任务的两个并发完成请求
    let (a, b) = tokio::join!(tracker.complete(id, 1, 3), tracker.complete(id, 1, 7));

    // Then: 恰好一个成功，另一个被拒绝
    let (winner, loser) = match (a, b) {
        (Ok(job), Err(e)) | (Err(e), Ok(job)) => (job, e),
        other => panic!("expected exactly one winner, got {:?}", other),
    };
    assert!(
        matches!(
            loser,
            JobError::ConcurrentModification(_) | JobError::InvalidTransition(_)
        ),
        "unexpected error: {:?}",
        loser
    );

    let stored = tracker.get(id).await.unwrap();
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.comments_found, winner.comments_found);
    assert_eq!(stored.version, winner.version);
}

#[tokio::test]
async fn test_complete_racing_cancel_never_mixes_state() {
    let (tracker, _repo, id) = running_job().await;

    let (completed, cancelled) =
        tokio::join!(tracker.complete(id, 1, 2), tracker.cancel(id, Some("stop")));
    assert!(completed.is_ok() != cancelled.is_ok());

    let stored = tracker.get(id).await.unwrap();
    match stored.status {
        JobStatus::Completed => {
            assert_eq!(stored.comments_found, 2);
            assert!(stored.errors.is_none());
        }
        JobStatus::Cancelled => {
            assert_eq!(stored.comments_found, 0);
            assert_eq!(stored.errors.as_deref(), Some("stop"));
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[tokio::test]
async fn test_stale_write_is_rejected_by_repository() {
    let (tracker, repo, id) = running_job().await;
    let stale = tracker.get(id).await.unwrap();

    // Given: 另一个写入者已经完成任务
    tracker.complete(id, 1, 1).await.unwrap();

    // When: 使用旧版本号再次写入
    let attempt = stale.clone().fail("late failure").unwrap();
    let result = repo
        .compare_and_swap(&attempt, stale.status, stale.version)
        .await;

    // Then
    assert!(matches!(result, Err(RepositoryError::Conflict)));
    assert_eq!(tracker.get(id).await.unwrap().status, JobStatus::Completed);
}

#[tokio::test]
async fn test_versions_increase_with_each_write() {
    let (tracker, _repo, id) = running_job().await;

    let started = tracker.get(id).await.unwrap();
    let progressed = tracker.update_progress(id, 1, 4).await.unwrap();
    let unchanged = tracker.update_progress(id, 1, 4).await.unwrap();
    let completed = tracker.complete(id, 1, 4).await.unwrap();

    assert_eq!(progressed.version, started.version + 1);
    assert_eq!(unchanged.version, progressed.version);
    assert_eq!(completed.version, progressed.version + 1);
    assert_eq!(tracker.count_by_status(JobStatus::Completed).await.unwrap(), 1);
}
