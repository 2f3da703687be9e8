// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use std::time::Duration;

use super::cache_backend::{CacheBackend, CacheError};
use crate::infrastructure::database::entities::cache_entry;

/// 数据库缓存后端
///
/// 将条目保存在 `cache_entries` 表中。查询时以 `expires_at` 过滤，
/// 过期但未清理的行对读取不可见，由 `purge_expired` 负责物理删除。
#[derive(Clone)]
pub struct DatabaseCacheBackend {
    db: Arc<DatabaseConnection>,
}

impl DatabaseCacheBackend {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 删除所有过期条目，返回删除行数
    pub async fn purge_expired(&self) -> Result<u64, CacheError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let result = cache_entry::Entity::delete_many()
            .filter(cache_entry::Column::ExpiresAt.lte(now))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn live_entry(&self, key: &str) -> Result<Option<cache_entry::Model>, CacheError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let model = cache_entry::Entity::find_by_id(key.to_string())
            .filter(cache_entry::Column::ExpiresAt.gt(now))
            .one(self.db.as_ref())
            .await?;
        Ok(model)
    }
}

#[async_trait]
impl CacheBackend for DatabaseCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.live_entry(key).await?.map(|m| m.cache_value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or_else(|| now + chrono::Duration::days(365));

        let model = cache_entry::ActiveModel {
            cache_key: Set(key.to_string()),
            cache_value: Set(value.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(now),
            updated_at: Set(now),
        };

        cache_entry::Entity::insert(model)
            .on_conflict(
                OnConflict::column(cache_entry::Column::CacheKey)
                    .update_columns([
                        cache_entry::Column::CacheValue,
                        cache_entry::Column::ExpiresAt,
                        cache_entry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        cache_entry::Entity::delete_by_id(key.to_string())
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError> {
        let now = Utc::now();
        Ok(self
            .live_entry(key)
            .await?
            .and_then(|m| (m.expires_at.with_timezone(&Utc) - now).to_std().ok()))
    }
}
