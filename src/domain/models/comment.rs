// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 评论实体
///
/// 由上游处理器抓取得到的一条评论文本，情感字段在分类后填充
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub content: String,
    pub author: Option<String>,
    pub url: Option<String>,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub scraped_at: Option<DateTime<FixedOffset>>,
    pub sentiment: Option<Sentiment>,
    pub confidence_score: Option<f64>,
    /// 是否已完成情感分类
    pub is_processed: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Comment {
    /// 为文章创建一条未处理的评论
    pub fn new(article_id: Uuid, content: String) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            article_id,
            content,
            author: None,
            url: None,
            publish_date: None,
            scraped_at: Some(now),
            sentiment: None,
            confidence_score: None,
            is_processed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 情感标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "POSITIVE"),
            Sentiment::Negative => write!(f, "NEGATIVE"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl FromStr for Sentiment {
    type Err = ();

    /// 大小写不敏感，上游返回的是小写标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(()),
        }
    }
}
