// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 抓取任务仓库（scraping_job_repository）：任务记录及其条件写入
/// - 文章仓库（article_repository）：文章的查找与创建
/// - 评论仓库（comment_repository）：评论的批量保存与分类结果回写
/// - 情感分析结果仓库（sentiment_result_repository）
/// - 用户仓库（user_repository）：外部身份到本地用户的映射
pub mod article_repository;
pub mod comment_repository;
pub mod scraping_job_repository;
pub mod sentiment_result_repository;
pub mod user_repository;
