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

use crate::config::settings::UpstreamSettings;
use bytes::Bytes;
use metrics::counter;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_LENGTH,
    HOST, TRANSFER_ENCODING,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// 透传时不转发的请求头（逐跳头）
static REQUEST_HEADER_DENY_LIST: [HeaderName; 5] =
    [HOST, CONTENT_LENGTH, CONNECTION, TRANSFER_ENCODING, ACCEPT_ENCODING];

/// 透传时不回传的响应头，响应体会被重新分帧
static RESPONSE_HEADER_DENY_LIST: [HeaderName; 3] = [TRANSFER_ENCODING, CONNECTION, CONTENT_LENGTH];

/// 转发错误
///
/// 只表示网络层失败。上游返回的非 2xx 响应不是转发错误。
#[derive(Error, Debug)]
pub enum ForwardingError {
    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid external processor URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ForwardingError {
    fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ForwardingError::Timeout {
                url: url.to_string(),
                source,
            }
        } else {
            ForwardingError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// 出错的目标URL
    pub fn url(&self) -> Option<&str> {
        match self {
            ForwardingError::Timeout { url, .. } | ForwardingError::Transport { url, .. } => {
                Some(url)
            }
            ForwardingError::InvalidBaseUrl { url, .. } => Some(url),
            ForwardingError::Client(_) => None,
        }
    }
}

/// 上游响应（类型化转发）
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// 原始响应体文本，由调用方解析
    pub body: String,
}

/// 透传请求
#[derive(Debug, Clone)]
pub struct PassthroughRequest {
    pub method: Method,
    /// 去掉路由前缀后的路径
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// 透传响应
#[derive(Debug, Clone)]
pub struct PassthroughResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// 上游代理转发器
///
/// 无状态的 HTTP 请求转换器。连接超时和读取超时在构造时确定，
/// 对所有请求统一生效。转发器从不自动重试。
#[derive(Clone)]
pub struct ProxyForwarder {
    client: reqwest::Client,
    base_url: String,
    read_timeout: Duration,
}

impl ProxyForwarder {
    /// 创建转发器
    ///
    /// # 参数
    ///
    /// * `base_url` - 上游服务基础URL
    /// * `connect_timeout` - 连接超时
    /// * `read_timeout` - 两次读取之间允许的最长等待（响应头和响应体）
    ///
    /// # 返回值
    ///
    /// * `Ok(ProxyForwarder)` - 转发器实例
    /// * `Err(ForwardingError)` - 基础URL无效或 HTTP 客户端构建失败
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, ForwardingError> {
        Url::parse(base_url).map_err(|source| ForwardingError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(ForwardingError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            read_timeout,
        })
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Result<Self, ForwardingError> {
        Self::new(
            &settings.base_url,
            settings.connect_timeout(),
            settings.read_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// 拼接目标URL：`base_url + path [+ "?" + query]`
    pub fn target_url(&self, path: &str, query: Option<&str>) -> String {
        let mut url = self.base_url.clone();
        if !path.is_empty() && !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// 类型化转发
    ///
    /// 以 JSON 发送 `payload`，返回状态码和原始响应体。
    /// 非 2xx 响应原样返回，由调用方决定如何处理。
    pub async fn forward_json<T>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<UpstreamResponse, ForwardingError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.target_url(path, None);
        debug!(url = %url, "Forwarding JSON request to external processor");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.record_failure(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.record_failure(&url, e))?;

        counter!("upstream_requests_total", "outcome" => "success").increment(1);
        debug!(url = %url, status = status.as_u16(), "External processor responded");

        Ok(UpstreamResponse { status, body })
    }

    /// 透明透传
    ///
    /// 使用相同的方法、过滤后的请求头和原始请求体访问上游，
    /// 返回上游的状态码、响应头和响应体。
    pub async fn passthrough(
        &self,
        request: PassthroughRequest,
    ) -> Result<PassthroughResponse, ForwardingError> {
        let url = self.target_url(&request.path, request.query.as_deref());
        debug!(method = %request.method, url = %url, "Passing request through to external processor");

        let response = self
            .client
            .request(request.method, &url)
            .headers(filter_request_headers(&request.headers))
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.record_failure(&url, e))?;

        let status = response.status();
        let headers = filter_response_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| self.record_failure(&url, e))?;

        counter!("upstream_requests_total", "outcome" => "success").increment(1);

        Ok(PassthroughResponse {
            status,
            headers,
            body,
        })
    }

    fn record_failure(&self, url: &str, source: reqwest::Error) -> ForwardingError {
        let error = ForwardingError::from_reqwest(url, source);
        let outcome = match &error {
            ForwardingError::Timeout { .. } => "timeout",
            _ => "error",
        };
        counter!("upstream_requests_total", "outcome" => outcome).increment(1);
        warn!(url, "Upstream request failed: {}", error);
        error
    }
}

/// 复制入站请求头，去掉逐跳头
pub fn filter_request_headers(headers: &HeaderMap) -> HeaderMap {
    copy_headers_except(headers, &REQUEST_HEADER_DENY_LIST[..])
}

pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    copy_headers_except(headers, &RESPONSE_HEADER_DENY_LIST[..])
}

fn copy_headers_except(headers: &HeaderMap, deny: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !deny.contains(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

#[cfg(test)]
#[path = "forwarder_test.rs"]
mod tests;
