// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 上游处理器模块
///
/// 包括 HTTP 转发器以及上游响应的解析
pub mod forwarder;
pub mod responses;
