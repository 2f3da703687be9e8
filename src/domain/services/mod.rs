// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 任务追踪（job_tracker）：抓取任务状态机的唯一写入口
pub mod job_tracker;
