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

use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::auth::jwt::{AuthError, JwtVerifier};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use std::sync::Arc;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// JWT 校验器
    pub verifier: Arc<JwtVerifier>,
    /// 用于把令牌主体映射为本地用户
    pub users: Arc<dyn UserRepository>,
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <jwt>`，把令牌主体解析为本地用户
/// （首次出现时自动创建），并写入请求扩展供处理器使用。
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - 缺少或无效令牌时为 401
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req).ok_or(AuthError::MissingToken)?;

    let claims = state.verifier.verify(token).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        e
    })?;

    let user = state.users.find_or_create(&claims.profile()).await?;
    debug!(user_id = %user.id, subject = %claims.sub, "Request authenticated");

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
