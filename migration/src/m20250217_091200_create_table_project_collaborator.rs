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
                    .table(ProjectCollaborator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectCollaborator::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::ProjectId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::InviterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::InviteeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::Role)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectCollaborator::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-project_collaborator-project_id")
                            .from(ProjectCollaborator::Table, ProjectCollaborator::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-project_collaborator-inviter_id")
                            .from(ProjectCollaborator::Table, ProjectCollaborator::InviterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-project_collaborator-invitee_id")
                            .from(ProjectCollaborator::Table, ProjectCollaborator::InviteeId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One non-withdrawn record per (project, invitee); the application
        // layer re-checks against pending/accepted before insert.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq-project_collaborator-project_id-invitee_id")
                    .table(ProjectCollaborator::Table)
                    .col(ProjectCollaborator::ProjectId)
                    .col(ProjectCollaborator::InviteeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectCollaborator::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectCollaborator {
    Table,
    Id,
    ProjectId,
    InviterId,
    InviteeId,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
