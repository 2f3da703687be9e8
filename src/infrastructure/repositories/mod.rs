// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::scraping_job_repository::RepositoryError;
use sea_orm::{DbErr, SqlErr};

/// 仓库实现模块
///
/// 提供领域仓库接口的 SeaORM 实现
pub mod article_repo_impl;
pub mod comment_repo_impl;
pub mod scraping_job_repo_impl;
pub mod sentiment_result_repo_impl;
pub mod user_repo_impl;

/// 插入是否因唯一约束冲突失败（并发的 find-or-create）
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// 把计数转换为 INTEGER 列的值
pub(crate) fn count_column(field: &'static str, value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value).map_err(|_| RepositoryError::OutOfRange { field, value })
}
