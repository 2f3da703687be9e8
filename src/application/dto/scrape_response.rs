// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use super::resource_dto::{
    ArticleDto, CommentDto, ScrapingJobDto, SentimentAnalysisResultDto,
};

/// 评论抓取响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeCommentsResponseDto {
    pub status: String,
    pub message: String,
    pub article: ArticleDto,
    pub comments: Vec<CommentDto>,
    /// 上游报告的评论总数
    pub total_comments: u32,
    pub job: ScrapingJobDto,
    pub timestamp: String,
}

/// 任务列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingJobListResponseDto {
    pub status: String,
    pub message: String,
    pub scraping_jobs: Vec<ScrapingJobDto>,
    pub total_jobs: usize,
    pub timestamp: String,
}

/// 单个任务响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingJobResponseDto {
    pub status: String,
    pub message: String,
    pub scraping_job: ScrapingJobDto,
    pub timestamp: String,
}

/// 评论分类请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentClassificationRequestDto {
    pub comment_id: uuid::Uuid,
    /// 模型名称，默认 `default_model`
    pub model_name: Option<String>,
}

/// 评论分类响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentClassificationResponseDto {
    pub status: String,
    pub message: String,
    pub comment: CommentDto,
    pub sentiment_analysis_result: SentimentAnalysisResultDto,
    pub timestamp: String,
}

/// 缓存状态响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatusDto {
    pub url: String,
    pub cached: bool,
    /// 剩余有效期（秒），-1 表示不存在
    pub remaining_ttl: i64,
}
