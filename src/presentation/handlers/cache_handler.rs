// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Query};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::dto::scrape_response::CacheStatusDto;
use crate::infrastructure::cache::scrape_cache::ScrapeCache;
use crate::presentation::errors::{AppError, HttpError};
use crate::presentation::extractors::current_user::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct CacheQuery {
    pub url: Option<String>,
}

impl CacheQuery {
    fn url(&self) -> Result<&str, HttpError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| HttpError::BadRequest("Query parameter 'url' is required".to_string()))
    }
}

/// 查看某个URL的缓存状态
pub async fn cache_status(
    Extension(cache): Extension<ScrapeCache>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<CacheQuery>,
) -> Result<Json<CacheStatusDto>, AppError> {
    let url = query.url()?;

    Ok(Json(CacheStatusDto {
        url: url.to_string(),
        cached: cache.has(url).await,
        remaining_ttl: cache.remaining_ttl(url).await,
    }))
}

/// 清除某个URL的缓存，条目不存在时同样成功
pub async fn clear_cache(
    Extension(cache): Extension<ScrapeCache>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<CacheQuery>,
) -> Result<Json<Value>, AppError> {
    let url = query.url()?;
    cache.clear(url).await;

    Ok(Json(json!({
        "status": "success",
        "message": "Cache entry cleared",
        "url": url,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
