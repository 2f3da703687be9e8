// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::application::dto::resource_dto::UserDto;
use crate::presentation::extractors::current_user::CurrentUser;

/// 当前登录用户的资料
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({
        "status": "success",
        "user": UserDto::from(user),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
