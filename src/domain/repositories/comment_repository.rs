// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::comment::{Comment, Sentiment};
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 评论仓库特质
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// 为文章批量保存评论文本，返回保存后的评论（顺序与输入一致）
    async fn create_many(
        &self,
        article_id: Uuid,
        contents: &[String],
    ) -> Result<Vec<Comment>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError>;

    /// 查找文章下的全部评论，按创建顺序
    async fn find_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, RepositoryError>;

    /// 写入分类结果并标记为已处理
    async fn update_sentiment(
        &self,
        comment_id: Uuid,
        sentiment: Sentiment,
        confidence_score: f64,
    ) -> Result<Comment, RepositoryError>;
}
