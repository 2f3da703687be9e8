// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::scraping_job::{JobStatus, ScrapingJob};
use crate::domain::repositories::scraping_job_repository::{
    RepositoryError, ScrapingJobRepository,
};
use crate::infrastructure::database::entities::scraping_job as job_entity;
use crate::infrastructure::repositories::count_column;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 抓取任务仓库实现
///
/// 基于SeaORM实现，状态变更使用带状态和版本号前置条件的单条 UPDATE
#[derive(Clone)]
pub struct ScrapingJobRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScrapingJobRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<job_entity::Model> for ScrapingJob {
    fn from(model: job_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status.parse().unwrap_or_default(),
            start_time: model.start_time,
            end_time: model.end_time,
            target_url: model.target_url,
            pages_scraped: model.pages_scraped.max(0) as u32,
            comments_found: model.comments_found.max(0) as u32,
            errors: model.errors,
            configuration: model.configuration,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<ScrapingJob> for job_entity::ActiveModel {
    type Error = RepositoryError;

    fn try_from(job: ScrapingJob) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(job.id),
            user_id: Set(job.user_id),
            status: Set(job.status.to_string()),
            start_time: Set(job.start_time),
            end_time: Set(job.end_time),
            target_url: Set(job.target_url),
            pages_scraped: Set(count_column("pages_scraped", job.pages_scraped)?),
            comments_found: Set(count_column("comments_found", job.comments_found)?),
            errors: Set(job.errors),
            configuration: Set(job.configuration),
            version: Set(job.version),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        })
    }
}

#[async_trait]
impl ScrapingJobRepository for ScrapingJobRepositoryImpl {
    async fn create(&self, job: &ScrapingJob) -> Result<ScrapingJob, RepositoryError> {
        let model = job_entity::ActiveModel::try_from(job.clone())?;

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapingJob>, RepositoryError> {
        let model = job_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn compare_and_swap(
        &self,
        job: &ScrapingJob,
        expected_status: JobStatus,
        expected_version: i32,
    ) -> Result<ScrapingJob, RepositoryError> {
        let now: DateTime<FixedOffset> = Utc::now().into();

        // Identity, owner, target and creation time are immutable
        let mut changes = job_entity::ActiveModel::try_from(job.clone())?;
        changes.id = NotSet;
        changes.user_id = NotSet;
        changes.target_url = NotSet;
        changes.created_at = NotSet;
        changes.version = Set(expected_version + 1);
        changes.updated_at = Set(now);

        let result = job_entity::Entity::update_many()
            .set(changes)
            .filter(job_entity::Column::Id.eq(job.id))
            .filter(job_entity::Column::Status.eq(expected_status.to_string()))
            .filter(job_entity::Column::Version.eq(expected_version))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return match self.find_by_id(job.id).await? {
                Some(_) => Err(RepositoryError::Conflict),
                None => Err(RepositoryError::NotFound),
            };
        }

        self.find_by_id(job.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        status: Option<JobStatus>,
    ) -> Result<Vec<ScrapingJob>, RepositoryError> {
        let mut query =
            job_entity::Entity::find().filter(job_entity::Column::UserId.eq(user_id));

        if let Some(status) = status {
            query = query.filter(job_entity::Column::Status.eq(status.to_string()));
        }

        let models = query
            .order_by_desc(job_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_by_status(&self, status: JobStatus) -> Result<u64, RepositoryError> {
        let count = job_entity::Entity::find()
            .filter(job_entity::Column::Status.eq(status.to_string()))
            .count(self.db.as_ref())
            .await?;

        Ok(count)
    }
}
