// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users;
mod m20250901_000002_create_scraping_jobs;
mod m20250901_000003_create_articles_and_comments;
mod m20250901_000004_create_sentiment_analysis_results;
mod m20250901_000005_create_cache_entries;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回按依赖顺序排列的迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users::Migration),
            Box::new(m20250901_000002_create_scraping_jobs::Migration),
            Box::new(m20250901_000003_create_articles_and_comments::Migration),
            Box::new(m20250901_000004_create_sentiment_analysis_results::Migration),
            Box::new(m20250901_000005_create_cache_entries::Migration),
        ]
    }
}
