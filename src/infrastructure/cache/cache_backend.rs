// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 缓存后端错误
///
/// 只在缓存层内部使用，`ScrapeCache` 会记录日志后吞掉，不向调用方传播
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 缓存后端接口
///
/// 以字符串为键和值的带过期时间存储。过期后的条目必须被视为不存在，
/// 即使物理上尚未被清理。
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// 读取未过期的值
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 写入值，覆盖同键的已有条目
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// 删除条目，不存在时不报错
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// 剩余有效期，条目不存在时返回 None
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError>;
}
