// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserProfile};
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use async_trait::async_trait;

/// 用户仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按外部 subject 查找用户，首次出现时根据令牌资料创建
    async fn find_or_create(&self, profile: &UserProfile) -> Result<User, RepositoryError>;

    async fn find_by_keycloak_id(&self, keycloak_id: &str)
        -> Result<Option<User>, RepositoryError>;
}
