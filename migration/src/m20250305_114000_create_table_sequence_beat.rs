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
                    .table(SequenceBeat::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SequenceBeat::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SequenceBeat::MeasureId).uuid().not_null())
                    .col(
                        ColumnDef::new(SequenceBeat::BeatPosition)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SequenceBeat::ChordId).uuid().null())
                    .col(
                        ColumnDef::new(SequenceBeat::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SequenceBeat::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sequence_beat-measure_id")
                            .from(SequenceBeat::Table, SequenceBeat::MeasureId)
                            .to(SequenceMeasure::Table, SequenceMeasure::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sequence_beat-chord_id")
                            .from(SequenceBeat::Table, SequenceBeat::ChordId)
                            .to(Chord::Table, Chord::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SequenceBeat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SequenceBeat {
    Table,
    Id,
    MeasureId,
    BeatPosition,
    ChordId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SequenceMeasure {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Chord {
    Table,
    Id,
}
