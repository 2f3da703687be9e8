// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层接口的技术实现，包括：
/// - 认证（auth）：JWT 校验
/// - 缓存（cache）：抓取结果缓存及其存储后端
/// - 数据库（database）：连接与实体定义
/// - 指标（metrics）：Prometheus 导出
/// - 仓库实现（repositories）：领域仓库接口的 SeaORM 实现
/// - 上游（upstream）：外部处理器的 HTTP 转发与响应解析
pub mod auth;
pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod upstream;
