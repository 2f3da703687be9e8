// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::comment::Sentiment;
use crate::domain::models::sentiment_result::SentimentAnalysisResult;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::domain::repositories::sentiment_result_repository::SentimentResultRepository;
use crate::infrastructure::database::entities::sentiment_analysis_result as result_entity;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 情感分析结果仓库实现
#[derive(Clone)]
pub struct SentimentResultRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SentimentResultRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<result_entity::Model> for SentimentAnalysisResult {
    fn from(model: result_entity::Model) -> Self {
        Self {
            id: model.id,
            comment_id: model.comment_id,
            model_name: model.model_name,
            sentiment: model.sentiment.parse().unwrap_or(Sentiment::Neutral),
            confidence_score: model.confidence_score,
            positive_score: model.positive_score,
            negative_score: model.negative_score,
            neutral_score: model.neutral_score,
            processed_at: model.processed_at,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl SentimentResultRepository for SentimentResultRepositoryImpl {
    async fn create(
        &self,
        result: &SentimentAnalysisResult,
    ) -> Result<SentimentAnalysisResult, RepositoryError> {
        let model = result_entity::ActiveModel {
            id: Set(result.id),
            comment_id: Set(result.comment_id),
            model_name: Set(result.model_name.clone()),
            sentiment: Set(result.sentiment.to_string()),
            confidence_score: Set(result.confidence_score),
            positive_score: Set(result.positive_score),
            negative_score: Set(result.negative_score),
            neutral_score: Set(result.neutral_score),
            processed_at: Set(result.processed_at),
            created_at: Set(result.created_at),
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(inserted.into())
    }

    async fn find_by_comment(
        &self,
        comment_id: Uuid,
    ) -> Result<Vec<SentimentAnalysisResult>, RepositoryError> {
        let models = result_entity::Entity::find()
            .filter(result_entity::Column::CommentId.eq(comment_id))
            .order_by_desc(result_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
