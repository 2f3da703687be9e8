// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::Article;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 文章仓库特质
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// 按 URL 查找文章，不存在则以给定标题和用户创建
    async fn find_or_create(
        &self,
        url: &str,
        title: &str,
        user_id: Uuid,
    ) -> Result<Article, RepositoryError>;

    /// 记录上游报告的评论总数，同时刷新抓取时间
    async fn update_total_comments(
        &self,
        article_id: Uuid,
        total_comments: u32,
    ) -> Result<Article, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;
}
