/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SequenceMeasure::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SequenceMeasure::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::SequenceId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::RepeatStart)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::RepeatEnd)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::EndingNumber)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SequenceMeasure::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sequence_measure-sequence_id")
                            .from(SequenceMeasure::Table, SequenceMeasure::SequenceId)
                            .to(Sequence::Table, Sequence::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq-sequence_measure-sequence_id-position")
                    .table(SequenceMeasure::Table)
                    .col(SequenceMeasure::SequenceId)
                    .col(SequenceMeasure::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SequenceMeasure::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SequenceMeasure {
    Table,
    Id,
    SequenceId,
    Position,
    RepeatStart,
    RepeatEnd,
    EndingNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Sequence {
    Table,
    Id,
}
