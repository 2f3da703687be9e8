// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::sentiment_result::SentimentAnalysisResult;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 情感分析结果仓库特质
#[async_trait]
pub trait SentimentResultRepository: Send + Sync {
    async fn create(
        &self,
        result: &SentimentAnalysisResult,
    ) -> Result<SentimentAnalysisResult, RepositoryError>;

    /// 查找某条评论的全部分析结果
    async fn find_by_comment(
        &self,
        comment_id: Uuid,
    ) -> Result<Vec<SentimentAnalysisResult>, RepositoryError>;
}
