// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::cache_backend::CacheBackend;
use crate::config::settings::CacheSettings;
use crate::domain::models::scraped_comments::ScrapedComments;

/// 剩余有效期查询的哨兵值：键不存在或未设置过期
pub const NO_TTL: i64 = -1;

/// 抓取结果缓存
///
/// 以 URL 的 SHA-256 摘要为键的内容寻址缓存。缓存只是加速手段：
/// 后端的任何错误都只记录日志，读取降级为未命中，写入和删除降级为空操作。
///
/// 键直接由调用方给出的 URL 字符串计算，不做任何规范化，
/// 大小写和空白都会影响结果。
#[derive(Clone)]
pub struct ScrapeCache {
    backend: Arc<dyn CacheBackend>,
    key_prefix: String,
    default_ttl: Duration,
}

impl ScrapeCache {
    /// 创建抓取结果缓存
    ///
    /// # 参数
    ///
    /// * `backend` - 存储后端
    /// * `key_prefix` - 键前缀
    /// * `default_ttl` - 默认有效期
    pub fn new(backend: Arc<dyn CacheBackend>, key_prefix: &str, default_ttl: Duration) -> Self {
        Self {
            backend,
            key_prefix: key_prefix.to_string(),
            default_ttl,
        }
    }

    pub fn from_settings(backend: Arc<dyn CacheBackend>, settings: &CacheSettings) -> Self {
        Self::new(backend, &settings.key_prefix, settings.ttl())
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// 计算 URL 对应的缓存键：`{prefix}:{hex(sha256(url))}`
    pub fn key_for(&self, url: &str) -> String {
        let digest = Sha256::digest(url.as_bytes());
        format!("{}:{}", self.key_prefix, hex::encode(digest))
    }

    /// 写入抓取结果，覆盖同一 URL 的旧条目
    pub async fn put(&self, url: &str, value: &ScrapedComments, ttl: Duration) {
        let key = self.key_for(url);
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(url, "Failed to serialize scrape result for cache: {}", e);
                return;
            }
        };

        match self.backend.set(&key, &payload, ttl).await {
            Ok(()) => debug!(url, key = %key, ttl_secs = ttl.as_secs(), "Cached scrape result"),
            Err(e) => warn!(url, key = %key, "Failed to cache scrape result: {}", e),
        }
    }

    /// 读取未过期的抓取结果，任何错误都视为未命中
    pub async fn get(&self, url: &str) -> Option<ScrapedComments> {
        let value = self.lookup(url).await;
        if value.is_some() {
            counter!("scrape_cache_hits_total").increment(1);
            debug!(url, "Scrape cache hit");
        } else {
            counter!("scrape_cache_misses_total").increment(1);
            debug!(url, "Scrape cache miss");
        }
        value
    }

    /// 是否存在可用条目，不计入命中率
    pub async fn has(&self, url: &str) -> bool {
        self.lookup(url).await.is_some()
    }

    async fn lookup(&self, url: &str) -> Option<ScrapedComments> {
        let key = self.key_for(url);
        let raw = match self.backend.get(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(url, key = %key, "Cache lookup failed, treating as miss: {}", e);
                None
            }
        };

        raw.and_then(|raw| match serde_json::from_str::<ScrapedComments>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url, key = %key, "Discarding unreadable cache entry: {}", e);
                None
            }
        })
    }

    /// 删除 URL 对应的条目，不存在时同样成功
    pub async fn clear(&self, url: &str) {
        let key = self.key_for(url);
        match self.backend.delete(&key).await {
            Ok(()) => debug!(url, key = %key, "Cleared cached scrape result"),
            Err(e) => warn!(url, key = %key, "Failed to clear cache entry: {}", e),
        }
    }

    /// 剩余有效期（秒）
    ///
    /// 键不存在、未设置过期或后端出错时返回 [`NO_TTL`]
    pub async fn remaining_ttl(&self, url: &str) -> i64 {
        let key = self.key_for(url);
        match self.backend.ttl(&key).await {
            Ok(Some(ttl)) => ttl.as_secs() as i64,
            Ok(None) => NO_TTL,
            Err(e) => {
                warn!(url, key = %key, "Failed to read cache ttl: {}", e);
                NO_TTL
            }
        }
    }
}

#[cfg(test)]
#[path = "scrape_cache_test.rs"]
mod tests;
