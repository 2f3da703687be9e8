// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::comment::Comment;
use crate::domain::models::sentiment_result::SentimentAnalysisResult;
use crate::domain::repositories::comment_repository::CommentRepository;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::domain::repositories::sentiment_result_repository::SentimentResultRepository;
use crate::infrastructure::upstream::forwarder::{ForwardingError, ProxyForwarder};
use crate::infrastructure::upstream::responses::{parse_sentiment_response, UpstreamParseError};

/// 未指定模型时记录的模型名
pub const DEFAULT_MODEL_NAME: &str = "default_model";

/// 评论分类错误
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Comment not found with ID: {0}")]
    CommentNotFound(Uuid),

    #[error(transparent)]
    Forwarding(#[from] ForwardingError),

    #[error(transparent)]
    UpstreamParse(#[from] UpstreamParseError),

    #[error("Persistence error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 分类结果
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub comment: Comment,
    pub result: SentimentAnalysisResult,
}

/// 评论情感分类用例
///
/// 将评论内容发送给上游分类接口，保存分析结果并回写评论
pub struct ClassifyCommentUseCase {
    comments: Arc<dyn CommentRepository>,
    results: Arc<dyn SentimentResultRepository>,
    forwarder: Arc<ProxyForwarder>,
    classify_path: String,
}

impl ClassifyCommentUseCase {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        results: Arc<dyn SentimentResultRepository>,
        forwarder: Arc<ProxyForwarder>,
        classify_path: &str,
    ) -> Self {
        Self {
            comments,
            results,
            forwarder,
            classify_path: classify_path.to_string(),
        }
    }

    pub async fn execute(
        &self,
        comment_id: Uuid,
        model_name: Option<&str>,
    ) -> Result<ClassificationOutcome, ClassifyError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(ClassifyError::CommentNotFound(comment_id))?;

        let response = self
            .forwarder
            .forward_json(&self.classify_path, &json!({ "comment": comment.content }))
            .await?;
        let scores = parse_sentiment_response(&response)?;

        let model_name = model_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_MODEL_NAME);
        let result = self
            .results
            .create(&SentimentAnalysisResult::new(
                comment.id,
                model_name.to_string(),
                scores,
            ))
            .await?;

        let comment = self
            .comments
            .update_sentiment(comment.id, scores.sentiment, scores.confidence_score)
            .await?;

        info!(
            comment_id = %comment.id,
            sentiment = %scores.sentiment,
            confidence = scores.confidence_score,
            "Comment classified"
        );

        Ok(ClassificationOutcome { comment, result })
    }
}
