// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了网关的核心业务实体，包括：
/// - 抓取任务（scraping_job）：带状态机的工作单元
/// - 文章（article）与评论（comment）：抓取目标及其结果
/// - 情感分析结果（sentiment_result）：评论分类的输出
/// - 用户（user）：外部身份在本地的映射
/// - 抓取结果（scraped_comments）：上游返回值及其缓存形态
pub mod article;
pub mod comment;
pub mod scraped_comments;
pub mod scraping_job;
pub mod sentiment_result;
pub mod user;
