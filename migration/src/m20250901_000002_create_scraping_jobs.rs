// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_users::Users;

/// 抓取任务表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapingJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapingJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapingJobs::UserId).uuid().not_null())
                    .col(ColumnDef::new(ScrapingJobs::Status).string_len(32).not_null())
                    .col(ColumnDef::new(ScrapingJobs::StartTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(ScrapingJobs::EndTime).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ScrapingJobs::TargetUrl)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScrapingJobs::PagesScraped)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScrapingJobs::CommentsFound)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ScrapingJobs::Errors).text())
                    .col(ColumnDef::new(ScrapingJobs::Configuration).json().not_null())
                    .col(
                        ColumnDef::new(ScrapingJobs::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScrapingJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScrapingJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Ownership only: removing a job never touches the user
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scraping_jobs_user_id")
                            .from(ScrapingJobs::Table, ScrapingJobs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scraping_jobs_user_status")
                    .table(ScrapingJobs::Table)
                    .col(ScrapingJobs::UserId)
                    .col(ScrapingJobs::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapingJobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapingJobs {
    Table,
    Id,
    UserId,
    Status,
    StartTime,
    EndTime,
    TargetUrl,
    PagesScraped,
    CommentsFound,
    Errors,
    Configuration,
    Version,
    CreatedAt,
    UpdatedAt,
}
