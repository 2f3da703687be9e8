// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::settings::Settings;
use crate::infrastructure::upstream::forwarder::{PassthroughRequest, ProxyForwarder};
use crate::presentation::errors::AppError;

/// 透明代理
///
/// 把前缀之后的路径、查询串、请求头和原始请求体原样转发给外部处理服务，
/// 并原样返回其状态码、响应头和响应体。上游不可达时返回 502。
pub async fn passthrough(
    Extension(forwarder): Extension<Arc<ProxyForwarder>>,
    Extension(settings): Extension<Arc<Settings>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let path = uri
        .path()
        .strip_prefix(settings.proxy.prefix.trim_end_matches('/'))
        .unwrap_or_else(|| uri.path())
        .to_string();

    let response = forwarder
        .passthrough(PassthroughRequest {
            method,
            path,
            query: uri.query().map(str::to_string),
            headers,
            body,
        })
        .await?;

    Ok((response.status, response.headers, response.body).into_response())
}
