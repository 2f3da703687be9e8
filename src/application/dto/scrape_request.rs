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

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 评论抓取请求数据传输对象
///
/// 用于封装客户端发起的"抓取某篇文章评论"请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ScrapeCommentsRequestDto {
    /// 文章URL，同时作为缓存键的输入
    #[validate(
        length(min = 1, max = 500, message = "URL must be between 1 and 500 characters"),
        url(message = "URL must be a valid absolute URL")
    )]
    pub url: String,
    /// 文章标题
    #[validate(length(min = 1, max = 500, message = "Title must be between 1 and 500 characters"))]
    pub title: String,
}

impl ScrapeCommentsRequestDto {
    /// 去掉首尾空白，缓存键基于处理后的URL计算
    pub fn trimmed(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
            title: self.title.trim().to_string(),
        }
    }
}
