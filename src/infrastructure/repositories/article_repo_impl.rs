// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::Article;
use crate::domain::repositories::article_repository::ArticleRepository;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::infrastructure::database::entities::article as article_entity;
use crate::infrastructure::repositories::{count_column, is_unique_violation};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 文章仓库实现
#[derive(Clone)]
pub struct ArticleRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ArticleRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Article>, RepositoryError> {
        let model = article_entity::Entity::find()
            .filter(article_entity::Column::Url.eq(url))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}

impl From<article_entity::Model> for Article {
    fn from(model: article_entity::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            url: model.url,
            total_comments: model.total_comments.max(0) as u32,
            scraped_at: model.scraped_at,
        }
    }
}

#[async_trait]
impl ArticleRepository for ArticleRepositoryImpl {
    async fn find_or_create(
        &self,
        url: &str,
        title: &str,
        user_id: Uuid,
    ) -> Result<Article, RepositoryError> {
        if let Some(existing) = self.find_by_url(url).await? {
            return Ok(existing);
        }

        let article = Article::new(url.to_string(), title.to_string(), user_id);
        let model = article_entity::ActiveModel {
            id: Set(article.id),
            user_id: Set(article.user_id),
            title: Set(article.title.clone()),
            url: Set(article.url.clone()),
            total_comments: Set(0),
            scraped_at: Set(article.scraped_at),
        };

        match model.insert(self.db.as_ref()).await {
            Ok(inserted) => {
                debug!(article_id = %inserted.id, url, "Created article");
                Ok(inserted.into())
            }
            // Another request created the same URL in the meantime
            Err(e) if is_unique_violation(&e) => self
                .find_by_url(url)
                .await?
                .ok_or(RepositoryError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_total_comments(
        &self,
        article_id: Uuid,
        total_comments: u32,
    ) -> Result<Article, RepositoryError> {
        let model = article_entity::Entity::find_by_id(article_id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let now: DateTime<FixedOffset> = Utc::now().into();
        let mut active = model.into_active_model();
        active.total_comments = Set(count_column("total_comments", total_comments)?);
        active.scraped_at = Set(Some(now));

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        let model = article_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
