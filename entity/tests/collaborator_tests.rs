/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the project collaborator entity

use chrono::NaiveDate;
use entity::project_collaborator::{self, CollaboratorRole, CollaboratorStatus};
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

#[tokio::test]
async fn test_collaborator_entity_basic() -> Result<(), DbErr> {
    let collaborator_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let inviter_id = Uuid::new_v4();
    let invitee_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_collaborator::Model {
            id: collaborator_id,
            project_id,
            inviter_id,
            invitee_id,
            role: CollaboratorRole::Editor,
            status: CollaboratorStatus::Pending,
            created_at: naive_date,
            updated_at: naive_date,
        }]])
        .into_connection();

    let result = project_collaborator::Entity::find_by_id(collaborator_id)
        .one(&db)
        .await?;

    assert!(result.is_some());
    let collaborator = result.unwrap();
    assert_eq!(collaborator.project_id, project_id);
    assert_eq!(collaborator.invitee_id, invitee_id);
    assert_eq!(collaborator.role, CollaboratorRole::Editor);
    assert_eq!(collaborator.status, CollaboratorStatus::Pending);

    Ok(())
}
