// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use crate::m20250901_000003_create_articles_and_comments::Comments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SentimentAnalysisResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::CommentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::ModelName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::Sentiment)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::ConfidenceScore)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SentimentAnalysisResults::PositiveScore).double())
                    .col(ColumnDef::new(SentimentAnalysisResults::NegativeScore).double())
                    .col(ColumnDef::new(SentimentAnalysisResults::NeutralScore).double())
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::ProcessedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(SentimentAnalysisResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sentiment_results_comment_id")
                            .from(
                                SentimentAnalysisResults::Table,
                                SentimentAnalysisResults::CommentId,
                            )
                            .to(Comments::Table, Comments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SentimentAnalysisResults::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum SentimentAnalysisResults {
    Table,
    Id,
    CommentId,
    ModelName,
    Sentiment,
    ConfidenceScore,
    PositiveScore,
    NegativeScore,
    NeutralScore,
    ProcessedAt,
    CreatedAt,
}
