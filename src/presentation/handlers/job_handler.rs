// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Path, Query};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::application::dto::scrape_response::{ScrapingJobListResponseDto, ScrapingJobResponseDto};
use crate::domain::models::scraping_job::{JobStatus, ScrapingJob};
use crate::domain::models::user::User;
use crate::domain::services::job_tracker::JobTracker;
use crate::presentation::errors::{AppError, HttpError};
use crate::presentation::extractors::current_user::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CancelJobQuery {
    pub reason: Option<String>,
}

/// 查询当前用户的任务列表
///
/// # 参数
///
/// * `status` - 可选的状态过滤，大小写不敏感
pub async fn list_jobs(
    Extension(jobs): Extension<JobTracker>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<JobListQuery>,
) -> Result<Json<ScrapingJobListResponseDto>, AppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<JobStatus>()
                .map_err(|_| HttpError::BadRequest(format!("Invalid job status: {}", raw)))?,
        ),
    };

    let found = jobs
        .list_for_owner(user.id, status)
        .await
        .map_err(|e| HttpError::Internal(format!("Failed to retrieve scraping jobs: {}", e)))?;

    Ok(Json(ScrapingJobListResponseDto {
        status: "success".to_string(),
        message: "Scraping jobs retrieved successfully".to_string(),
        total_jobs: found.len(),
        scraping_jobs: found.into_iter().map(Into::into).collect(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// 查询单个任务，只允许任务所有者访问
pub async fn get_job(
    Extension(jobs): Extension<JobTracker>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ScrapingJobResponseDto>, AppError> {
    let job = owned_job(&jobs, &user, id).await?;

    Ok(Json(ScrapingJobResponseDto {
        status: "success".to_string(),
        message: "Scraping job retrieved successfully".to_string(),
        scraping_job: job.into(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// 取消任务
///
/// 只修改任务记录，不会中断已经发出的上游请求。
/// 已处于终态的任务返回 400。
pub async fn cancel_job(
    Extension(jobs): Extension<JobTracker>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CancelJobQuery>,
) -> Result<Json<ScrapingJobResponseDto>, AppError> {
    owned_job(&jobs, &user, id).await?;

    let reason = query
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let cancelled = jobs.cancel(id, reason).await?;

    Ok(Json(ScrapingJobResponseDto {
        status: "success".to_string(),
        message: "Scraping job cancelled successfully".to_string(),
        scraping_job: cancelled.into(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn owned_job(jobs: &JobTracker, user: &User, id: Uuid) -> Result<ScrapingJob, AppError> {
    let job = jobs
        .find(id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Scraping job not found with ID: {}", id)))?;

    if !job.is_owned_by(user.id) {
        return Err(HttpError::Forbidden(
            "Access denied - Job belongs to another user".to_string(),
        )
        .into());
    }

    Ok(job)
}
