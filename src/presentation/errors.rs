// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::application::usecases::classify_comment::ClassifyError;
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::domain::services::job_tracker::JobError;
use crate::infrastructure::auth::jwt::AuthError;
use crate::infrastructure::upstream::forwarder::ForwardingError;

/// 处理器直接给出状态码的错误
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// 应用错误类型
///
/// 封装所有可能的应用层错误，响应时按错误类型映射到HTTP状态码，
/// 响应体统一为 `{status: "error", message, timestamp}`。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 根据内部错误推断状态码
    pub fn status_code(&self) -> StatusCode {
        let err = &self.0;

        if let Some(e) = err.downcast_ref::<HttpError>() {
            return match e {
                HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
                HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
                HttpError::NotFound(_) => StatusCode::NOT_FOUND,
                HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        if let Some(e) = err.downcast_ref::<JobError>() {
            return job_error_status(e);
        }
        if let Some(e) = err.downcast_ref::<ClassifyError>() {
            return match e {
                ClassifyError::CommentNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        if let Some(e) = err.downcast_ref::<RepositoryError>() {
            return repository_error_status(e);
        }
        if err.downcast_ref::<AuthError>().is_some() {
            return StatusCode::UNAUTHORIZED;
        }
        if err.downcast_ref::<validator::ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        // Only the passthrough surface lets forwarding errors escape unwrapped
        if err.downcast_ref::<ForwardingError>().is_some() {
            return StatusCode::BAD_GATEWAY;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn job_error_status(e: &JobError) -> StatusCode {
    match e {
        JobError::NotFound(_) => StatusCode::NOT_FOUND,
        JobError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        JobError::ConcurrentModification(_) => StatusCode::CONFLICT,
        JobError::Repository(inner) => repository_error_status(inner),
    }
}

fn repository_error_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::Database(_) | RepositoryError::OutOfRange { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {:?}", self.0);
        }

        let body = Json(json!({
            "status": "error",
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
