// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraping_job::{JobAction, JobStatus, ScrapingJob, TransitionError};
use crate::domain::repositories::scraping_job_repository::{
    RepositoryError, ScrapingJobRepository,
};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 任务追踪错误
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Scraping job not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// 条件写入失败，期间有其他请求修改了同一任务
    #[error("Scraping job {0} was modified concurrently")]
    ConcurrentModification(Uuid),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 任务追踪器
///
/// 抓取任务状态机的唯一写入口。每次变更都是"读取-校验-条件写入"：
/// 先读取当前记录，在领域模型上执行状态转换，再以读取时的状态和版本号
/// 作为前置条件写回。前置条件不成立时返回 `ConcurrentModification`，
/// 不会自动重试。
///
/// 追踪器不做权限判断，调用方负责校验任务归属。
#[derive(Clone)]
pub struct JobTracker {
    repository: Arc<dyn ScrapingJobRepository>,
}

impl JobTracker {
    pub fn new(repository: Arc<dyn ScrapingJobRepository>) -> Self {
        Self { repository }
    }

    /// 创建 Pending 任务
    ///
    /// # 参数
    ///
    /// * `user_id` - 任务归属用户
    /// * `target_url` - 抓取目标
    /// * `configuration` - 运行参数，原样保存
    pub async fn create(
        &self,
        user_id: Uuid,
        target_url: &str,
        configuration: serde_json::Value,
    ) -> Result<ScrapingJob, JobError> {
        let job = ScrapingJob::new(user_id, target_url.to_string(), configuration);
        let created = self.repository.create(&job).await?;
        counter!("scraping_jobs_transitions_total", "status" => JobStatus::Pending.as_str())
            .increment(1);
        info!(job_id = %created.id, target_url, "Created scraping job");
        Ok(created)
    }

    pub async fn start(&self, id: Uuid) -> Result<ScrapingJob, JobError> {
        self.transition(id, JobAction::Start, |job| job.start()).await
    }

    /// 更新进度，参数为新的累计值
    pub async fn update_progress(
        &self,
        id: Uuid,
        pages_scraped: u32,
        comments_found: u32,
    ) -> Result<ScrapingJob, JobError> {
        self.transition(id, JobAction::UpdateProgress, |job| {
            job.update_progress(pages_scraped, comments_found)
        })
        .await
    }

    pub async fn complete(
        &self,
        id: Uuid,
        pages_scraped: u32,
        comments_found: u32,
    ) -> Result<ScrapingJob, JobError> {
        self.transition(id, JobAction::Complete, |job| {
            job.complete(pages_scraped, comments_found)
        })
        .await
    }

    pub async fn fail(&self, id: Uuid, error_message: &str) -> Result<ScrapingJob, JobError> {
        self.transition(id, JobAction::Fail, |job| job.fail(error_message))
            .await
    }

    /// 取消任务
    ///
    /// 未提供原因时使用默认原因。终态任务返回 `InvalidTransition`。
    pub async fn cancel(&self, id: Uuid, reason: Option<&str>) -> Result<ScrapingJob, JobError> {
        self.transition(id, JobAction::Cancel, |job| job.cancel(reason))
            .await
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<ScrapingJob>, JobError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// 查找任务，不存在时返回 `NotFound`
    pub async fn get(&self, id: Uuid) -> Result<ScrapingJob, JobError> {
        self.find(id).await?.ok_or(JobError::NotFound(id))
    }

    pub async fn list_for_owner(
        &self,
        user_id: Uuid,
        status: Option<JobStatus>,
    ) -> Result<Vec<ScrapingJob>, JobError> {
        Ok(self.repository.find_by_user(user_id, status).await?)
    }

    pub async fn count_by_status(&self, status: JobStatus) -> Result<u64, JobError> {
        Ok(self.repository.count_by_status(status).await?)
    }

    async fn transition<F>(
        &self,
        id: Uuid,
        action: JobAction,
        apply: F,
    ) -> Result<ScrapingJob, JobError>
    where
        F: FnOnce(ScrapingJob) -> Result<ScrapingJob, TransitionError>,
    {
        let current = self.get(id).await?;
        let expected_status = current.status;
        let expected_version = current.version;

        let next = match apply(current.clone()) {
            Ok(next) => next,
            Err(e) => {
                warn!(job_id = %id, status = %expected_status, "Rejected job transition: {}", e);
                return Err(e.into());
            }
        };

        // Nothing changed (restart while running, repeated progress)
        if next == current {
            debug!(job_id = %id, "Job transition '{}' left the record unchanged", action);
            return Ok(current);
        }

        let saved = self
            .repository
            .compare_and_swap(&next, expected_status, expected_version)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict => {
                    warn!(job_id = %id, "Lost update while trying to {} job", action);
                    JobError::ConcurrentModification(id)
                }
                RepositoryError::NotFound => JobError::NotFound(id),
                other => JobError::Repository(other),
            })?;

        if saved.status != expected_status {
            counter!("scraping_jobs_transitions_total", "status" => saved.status.as_str())
                .increment(1);
            info!(
                job_id = %id,
                from = %expected_status,
                to = %saved.status,
                "Scraping job transitioned"
            );
        } else {
            debug!(
                job_id = %id,
                pages_scraped = saved.pages_scraped,
                comments_found = saved.comments_found,
                "Scraping job progress updated"
            );
        }

        Ok(saved)
    }
}

#[cfg(test)]
#[path = "job_tracker_test.rs"]
mod tests;
