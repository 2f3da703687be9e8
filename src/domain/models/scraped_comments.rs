// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 上游处理器返回的一次抓取结果
///
/// 临时对象，不直接持久化。`total_comments` 是上游报告的数字，
/// 不一定等于 `comments.len()`，两者都会被记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub comments: Vec<String>,
    pub total_comments: u32,
}

/// 缓存中保存的抓取结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedComments {
    pub url: String,
    pub comments: Vec<String>,
    pub total_comments: u32,
    /// 写入时刻（Unix 毫秒）
    pub timestamp: i64,
}

impl ScrapedComments {
    pub fn new(url: &str, result: &ScrapeResult) -> Self {
        Self {
            url: url.to_string(),
            comments: result.comments.clone(),
            total_comments: result.total_comments,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn into_result(self) -> ScrapeResult {
        ScrapeResult {
            comments: self.comments,
            total_comments: self.total_comments,
        }
    }
}
