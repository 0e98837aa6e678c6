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
                    .table(Chord::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chord::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Chord::Name).string().null())
                    .col(ColumnDef::new(Chord::Markers).json_binary().not_null())
                    .col(ColumnDef::new(Chord::Position).integer().not_null())
                    .col(
                        ColumnDef::new(Chord::StringCount)
                            .integer()
                            .not_null()
                            .default(6),
                    )
                    .col(
                        ColumnDef::new(Chord::Tuning)
                            .string()
                            .not_null()
                            .default("EADGBE"),
                    )
                    .col(ColumnDef::new(Chord::SongId).uuid().not_null())
                    .col(ColumnDef::new(Chord::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Chord::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-chord-song_id")
                            .from(Chord::Table, Chord::SongId)
                            .to(Song::Table, Song::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-chord-song_id")
                    .table(Chord::Table)
                    .col(Chord::SongId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Chord {
    Table,
    Id,
    Name,
    Markers,
    Position,
    StringCount,
    Tuning,
    SongId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Song {
    Table,
    Id,
}
