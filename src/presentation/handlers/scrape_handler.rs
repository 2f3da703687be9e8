// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::{
    application::dto::{
        scrape_request::ScrapeCommentsRequestDto, scrape_response::ScrapeCommentsResponseDto,
    },
    application::usecases::scrape_comments::ScrapeCommentsUseCase,
    presentation::errors::{AppError, HttpError},
    presentation::extractors::current_user::CurrentUser,
};

/// 抓取评论
///
/// 校验请求后交给编排用例执行。流程中的任何失败都以 500 返回，
/// 对应的任务已被标记为失败。
pub async fn scrape_comments(
    Extension(use_case): Extension<Arc<ScrapeCommentsUseCase>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ScrapeCommentsRequestDto>,
) -> Result<Json<ScrapeCommentsResponseDto>, AppError> {
    let request = payload.trimmed();
    request.validate()?;

    info!(user_id = %user.id, url = %request.url, "Received scrape request");

    let outcome = use_case
        .execute(user.id, request)
        .await
        .map_err(|e| HttpError::Internal(format!("Failed to scrape comments: {}", e)))?;

    Ok(Json(ScrapeCommentsResponseDto {
        status: "success".to_string(),
        message: "Comments scraped and saved successfully".to_string(),
        article: outcome.article.into(),
        comments: outcome.comments.into_iter().map(Into::into).collect(),
        total_comments: outcome.total_comments,
        job: outcome.job.into(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
