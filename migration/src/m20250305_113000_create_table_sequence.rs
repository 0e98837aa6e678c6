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
                    .table(Sequence::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sequence::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Sequence::SongId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Sequence::TimeSignatureNumerator)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(Sequence::TimeSignatureDenominator)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(
                        ColumnDef::new(Sequence::MeasuresPerLine)
                            .integer()
                            .not_null()
                            .default(4),
                    )
                    .col(ColumnDef::new(Sequence::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Sequence::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sequence-song_id")
                            .from(Sequence::Table, Sequence::SongId)
                            .to(Song::Table, Song::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sequence::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sequence {
    Table,
    Id,
    SongId,
    TimeSignatureNumerator,
    TimeSignatureDenominator,
    MeasuresPerLine,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Song {
    Table,
    Id,
}
