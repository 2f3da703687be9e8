// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::comment::Sentiment;

/// 情感分析的分数
///
/// 无论上游返回哪一种格式，最终都归一化为这一结构
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// 预测标签
    pub sentiment: Sentiment,
    /// 预测标签对应的分数
    pub confidence_score: f64,
    pub positive_score: f64,
    pub negative_score: f64,
    pub neutral_score: f64,
}

/// 情感分析结果实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysisResult {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub model_name: String,
    pub sentiment: Sentiment,
    pub confidence_score: f64,
    pub positive_score: Option<f64>,
    pub negative_score: Option<f64>,
    pub neutral_score: Option<f64>,
    pub processed_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

impl SentimentAnalysisResult {
    pub fn new(comment_id: Uuid, model_name: String, scores: SentimentScores) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            comment_id,
            model_name,
            sentiment: scores.sentiment,
            confidence_score: scores.confidence_score,
            positive_score: Some(scores.positive_score),
            negative_score: Some(scores.negative_score),
            neutral_score: Some(scores.neutral_score),
            processed_at: Some(now),
            created_at: now,
        }
    }
}
