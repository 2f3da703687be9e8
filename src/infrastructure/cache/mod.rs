// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供抓取结果缓存及其可替换的存储后端：
/// Redis、数据库表和进程内存
pub mod cache_backend;
pub mod database_backend;
pub mod memory_backend;
pub mod redis_client;
pub mod scrape_cache;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::settings::{CacheBackendKind, Settings};
use cache_backend::{CacheBackend, CacheError};
use database_backend::DatabaseCacheBackend;
use memory_backend::MemoryCacheBackend;
use redis_client::RedisClient;

/// 按配置选择缓存后端
///
/// # 参数
///
/// * `settings` - 应用配置
/// * `db` - 数据库后端使用的连接
///
/// # 返回值
///
/// * `Ok(Arc<dyn CacheBackend>)` - 选定的后端
/// * `Err(CacheError)` - Redis URL 无效
pub fn backend_from_settings(
    settings: &Settings,
    db: Arc<DatabaseConnection>,
) -> Result<Arc<dyn CacheBackend>, CacheError> {
    let backend: Arc<dyn CacheBackend> = match settings.cache.backend {
        CacheBackendKind::Redis => Arc::new(RedisClient::new(&settings.redis.url)?),
        CacheBackendKind::Database => Arc::new(DatabaseCacheBackend::new(db)),
        CacheBackendKind::Memory => Arc::new(MemoryCacheBackend::new()),
    };
    Ok(backend)
}
