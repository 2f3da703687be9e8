// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraping_job::{JobStatus, ScrapingJob};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 条件更新未命中：记录已被其他写入者修改
    #[error("Record was modified concurrently")]
    Conflict,
    /// 计数超出数据库列的取值范围
    #[error("Value {value} for {field} does not fit the database column")]
    OutOfRange { field: &'static str, value: u32 },
}

/// 抓取任务仓库特质
///
/// 定义任务数据访问接口
#[async_trait]
pub trait ScrapingJobRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, job: &ScrapingJob) -> Result<ScrapingJob, RepositoryError>;

    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapingJob>, RepositoryError>;

    /// 条件写入
    ///
    /// 仅当存储中的记录仍处于 `expected_status` 且版本号等于
    /// `expected_version` 时才写入 `job`，写入后版本号加一。
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapingJob)` - 写入后的记录
    /// * `Err(RepositoryError::Conflict)` - 记录已被并发修改
    async fn compare_and_swap(
        &self,
        job: &ScrapingJob,
        expected_status: JobStatus,
        expected_version: i32,
    ) -> Result<ScrapingJob, RepositoryError>;

    /// 查找某个用户的任务，按创建时间倒序
    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<JobStatus>,
    ) -> Result<Vec<ScrapingJob>, RepositoryError>;

    /// 统计处于指定状态的任务数量
    async fn count_by_status(&self, status: JobStatus) -> Result<u64, RepositoryError>;
}
