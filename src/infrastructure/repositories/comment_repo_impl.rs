// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::comment::{Comment, Sentiment};
use crate::domain::repositories::comment_repository::CommentRepository;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::infrastructure::database::entities::comment as comment_entity;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 评论仓库实现
#[derive(Clone)]
pub struct CommentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CommentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<comment_entity::Model> for Comment {
    fn from(model: comment_entity::Model) -> Self {
        Self {
            id: model.id,
            article_id: model.article_id,
            content: model.content,
            author: model.author,
            url: model.url,
            publish_date: model.publish_date,
            scraped_at: model.scraped_at,
            sentiment: model.sentiment.and_then(|s| s.parse().ok()),
            confidence_score: model.confidence_score,
            is_processed: model.is_processed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Comment> for comment_entity::ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            article_id: Set(comment.article_id),
            content: Set(comment.content),
            author: Set(comment.author),
            url: Set(comment.url),
            publish_date: Set(comment.publish_date),
            scraped_at: Set(comment.scraped_at),
            sentiment: Set(comment.sentiment.map(|s| s.to_string())),
            confidence_score: Set(comment.confidence_score),
            is_processed: Set(comment.is_processed),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        }
    }
}

#[async_trait]
impl CommentRepository for CommentRepositoryImpl {
    async fn create_many(
        &self,
        article_id: Uuid,
        contents: &[String],
    ) -> Result<Vec<Comment>, RepositoryError> {
        if contents.is_empty() {
            return Ok(Vec::new());
        }

        // Stagger creation times so that reads keep the upstream order
        let base: DateTime<FixedOffset> = Utc::now().into();
        let comments: Vec<Comment> = contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let mut comment = Comment::new(article_id, content.clone());
                comment.created_at = base + Duration::microseconds(i as i64);
                comment.updated_at = comment.created_at;
                comment
            })
            .collect();

        let models: Vec<comment_entity::ActiveModel> =
            comments.iter().cloned().map(Into::into).collect();
        comment_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;

        Ok(comments)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
        let model = comment_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepositoryError> {
        let models = comment_entity::Entity::find()
            .filter(comment_entity::Column::ArticleId.eq(article_id))
            .order_by_asc(comment_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_sentiment(
        &self,
        comment_id: Uuid,
        sentiment: Sentiment,
        confidence_score: f64,
    ) -> Result<Comment, RepositoryError> {
        let model = comment_entity::Entity::find_by_id(comment_id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let now: DateTime<FixedOffset> = Utc::now().into();
        let mut active = model.into_active_model();
        active.sentiment = Set(Some(sentiment.to_string()));
        active.confidence_score = Set(Some(confidence_score));
        active.is_processed = Set(true);
        active.updated_at = Set(now);

        let updated = active.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }
}
