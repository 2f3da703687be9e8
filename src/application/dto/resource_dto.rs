// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::Article;
use crate::domain::models::comment::{Comment, Sentiment};
use crate::domain::models::scraping_job::{JobStatus, ScrapingJob};
use crate::domain::models::sentiment_result::SentimentAnalysisResult;
use crate::domain::models::user::User;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户数据传输对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub keycloak_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            keycloak_id: user.keycloak_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// 文章数据传输对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub url: String,
    pub total_comments: u32,
    pub scraped_at: Option<DateTime<FixedOffset>>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            user_id: article.user_id,
            title: article.title,
            url: article.url,
            total_comments: article.total_comments,
            scraped_at: article.scraped_at,
        }
    }
}

/// 评论数据传输对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    pub article_id: Uuid,
    pub content: String,
    pub author: Option<String>,
    pub url: Option<String>,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub scraped_at: Option<DateTime<FixedOffset>>,
    pub sentiment: Option<Sentiment>,
    pub confidence_score: Option<f64>,
    pub is_processed: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            article_id: comment.article_id,
            content: comment.content,
            author: comment.author,
            url: comment.url,
            publish_date: comment.publish_date,
            scraped_at: comment.scraped_at,
            sentiment: comment.sentiment,
            confidence_score: comment.confidence_score,
            is_processed: comment.is_processed,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// 抓取任务数据传输对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingJobDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: JobStatus,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub target_url: String,
    pub pages_scraped: u32,
    pub comments_found: u32,
    pub errors: Option<String>,
    pub configuration: serde_json::Value,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<ScrapingJob> for ScrapingJobDto {
    fn from(job: ScrapingJob) -> Self {
        Self {
            id: job.id,
            user_id: job.user_id,
            status: job.status,
            start_time: job.start_time,
            end_time: job.end_time,
            target_url: job.target_url,
            pages_scraped: job.pages_scraped,
            comments_found: job.comments_found,
            errors: job.errors,
            configuration: job.configuration,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// 情感分析结果数据传输对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysisResultDto {
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

impl From<SentimentAnalysisResult> for SentimentAnalysisResultDto {
    fn from(result: SentimentAnalysisResult) -> Self {
        Self {
            id: result.id,
            comment_id: result.comment_id,
            model_name: result.model_name,
            sentiment: result.sentiment,
            confidence_score: result.confidence_score,
            positive_score: result.positive_score,
            negative_score: result.negative_score,
            neutral_score: result.neutral_score,
            processed_at: result.processed_at,
            created_at: result.created_at,
        }
    }
}
