// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::application::dto::scrape_response::{
    CommentClassificationRequestDto, CommentClassificationResponseDto,
};
use crate::application::usecases::classify_comment::{ClassifyCommentUseCase, ClassifyError};
use crate::presentation::errors::{AppError, HttpError};
use crate::presentation::extractors::current_user::CurrentUser;

/// 对单条评论做情感分析
pub async fn classify_comment(
    Extension(use_case): Extension<Arc<ClassifyCommentUseCase>>,
    CurrentUser(_user): CurrentUser,
    Json(payload): Json<CommentClassificationRequestDto>,
) -> Result<Json<CommentClassificationResponseDto>, AppError> {
    let outcome = use_case
        .execute(payload.comment_id, payload.model_name.as_deref())
        .await
        .map_err(|e| match e {
            not_found @ ClassifyError::CommentNotFound(_) => AppError::from(not_found),
            other => HttpError::Internal(format!("Failed to analyze comment sentiment: {}", other))
                .into(),
        })?;

    Ok(Json(CommentClassificationResponseDto {
        status: "success".to_string(),
        message: "Comment sentiment analysis completed successfully".to_string(),
        comment: outcome.comment.into(),
        sentiment_analysis_result: outcome.result.into(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
