// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 文章实体
///
/// 评论的抓取目标，以 URL 唯一标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    /// 首次登记该文章的用户
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    /// 上游报告的评论总数
    pub total_comments: u32,
    /// 最近一次抓取时间
    pub scraped_at: Option<DateTime<FixedOffset>>,
}

impl Article {
    pub fn new(url: String, title: String, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            url,
            total_comments: 0,
            scraped_at: Some(Utc::now().into()),
        }
    }
}
