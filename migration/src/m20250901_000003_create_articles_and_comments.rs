// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_users::Users;

/// 文章与评论表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Articles (unique by url)
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Articles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Articles::UserId).uuid().not_null())
                    .col(ColumnDef::new(Articles::Title).string_len(500).not_null())
                    .col(
                        ColumnDef::new(Articles::Url)
                            .string_len(500)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Articles::TotalComments)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Articles::ScrapedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_user_id")
                            .from(Articles::Table, Articles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. Comments (depends on Articles)
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comments::ArticleId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::Author).string_len(255))
                    .col(ColumnDef::new(Comments::Url).string_len(500))
                    .col(ColumnDef::new(Comments::PublishDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Comments::ScrapedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Comments::Sentiment).string_len(16))
                    .col(ColumnDef::new(Comments::ConfidenceScore).double())
                    .col(
                        ColumnDef::new(Comments::IsProcessed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Comments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Comments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_article_id")
                            .from(Comments::Table, Comments::ArticleId)
                            .to(Articles::Table, Articles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_article_id")
                    .table(Comments::Table)
                    .col(Comments::ArticleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    UserId,
    Title,
    Url,
    TotalComments,
    ScrapedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Comments {
    Table,
    Id,
    ArticleId,
    Content,
    Author,
    Url,
    PublishDate,
    ScrapedAt,
    Sentiment,
    ConfidenceScore,
    IsProcessed,
    CreatedAt,
    UpdatedAt,
}
