// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use super::cache_backend::{CacheBackend, CacheError};

/// 缓存条目
#[derive(Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 内存缓存后端
///
/// 单进程使用，主要用于开发和测试。过期条目在读取时惰性清理。
#[derive(Default)]
pub struct MemoryCacheBackend {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前物理存储的条目数（包含尚未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.get(key)?.clone();
        if entry.is_expired() {
            self.evict_expired(key);
            return None;
        }
        Some(entry)
    }

    /// 仅当条目仍然过期时删除，避免误删并发写入的新值
    fn evict_expired(&self, key: &str) {
        self.entries.remove_if(key, |_, current| current.is_expired());
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.live_entry(key).map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError> {
        Ok(self
            .live_entry(key)
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now())))
    }
}

#[cfg(test)]
#[path = "memory_backend_test.rs"]
mod tests;
