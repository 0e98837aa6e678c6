/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for effective-role resolution


use capo_core::access::*;
use capo_core::types::*;
use chrono::{NaiveDate, NaiveDateTime};
use entity::chord::ChordMarkers;
use entity::project_collaborator::{CollaboratorRole, CollaboratorStatus};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn project(id: Uuid, user_id: Uuid) -> MProject {
    MProject {
        id,
        name: "Practice Set".to_owned(),
        user_id,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn collaborator(
    project_id: Uuid,
    invitee_id: Uuid,
    role: CollaboratorRole,
    status: CollaboratorStatus,
) -> MProjectCollaborator {
    MProjectCollaborator {
        id: Uuid::new_v4(),
        project_id,
        inviter_id: Uuid::new_v4(),
        invitee_id,
        role,
        status,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn song(id: Uuid, project_id: Uuid) -> MSong {
    MSong {
        id,
        name: "Blackbird".to_owned(),
        project_id,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn chord(id: Uuid, song_id: Uuid, position: i32) -> MChord {
    MChord {
        id,
        name: Some("Am".to_owned()),
        markers: ChordMarkers::default(),
        position,
        string_count: 6,
        tuning: "EADGBE".to_owned(),
        starting_fret: 0,
        song_id,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

#[tokio::test]
async fn test_owner_resolves_without_collaborator_lookup() {
    let owner_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();

    // Only the project query is stubbed; if ownership did not short-circuit,
    // the collaborator lookup would hit an empty mock buffer and fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project(project_id, owner_id)]])
        .into_connection();

    let (resolved, role) = resolve_project_access(&db, project_id, owner_id)
        .await
        .unwrap();

    assert_eq!(resolved.id, project_id);
    assert_eq!(role, ProjectRole::Owner);
}

#[tokio::test]
async fn test_accepted_collaborator_resolves_to_record_role() {
    let owner_id = Uuid::new_v4();
    let collaborator_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project(project_id, owner_id)]])
        .append_query_results([vec![collaborator(
            project_id,
            collaborator_id,
            CollaboratorRole::Editor,
            CollaboratorStatus::Accepted,
        )]])
        .into_connection();

    let (_, role) = resolve_project_access(&db, project_id, collaborator_id)
        .await
        .unwrap();

    assert_eq!(role, ProjectRole::Editor);
}

#[tokio::test]
async fn test_no_collaborator_record_is_forbidden() {
    let owner_id = Uuid::new_v4();
    let stranger_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project(project_id, owner_id)]])
        .append_query_results([Vec::<MProjectCollaborator>::new()])
        .into_connection();

    let err = resolve_project_access(&db, project_id, stranger_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::Forbidden));
}

#[tokio::test]
async fn test_absent_project_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MProject>::new()])
        .into_connection();

    let err = resolve_project_access(&db, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::NotFound("Project")));
    assert_eq!(err.to_string(), "Project not found");
}

#[tokio::test]
async fn test_collaborator_lookup_filters_on_accepted_status() {
    let owner_id = Uuid::new_v4();
    let invitee_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project(project_id, owner_id)]])
        .append_query_results([Vec::<MProjectCollaborator>::new()])
        .into_connection();

    let err = resolve_project_access(&db, project_id, invitee_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden));

    // A pending or declined record must never grant access: the lookup
    // itself is pinned to accepted status.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 2);
    let collaborator_query = format!("{:?}", log[1]);
    assert!(collaborator_query.contains("status"));
    assert!(collaborator_query.contains("accepted"));
}

#[tokio::test]
async fn test_song_resolves_through_owning_project() {
    let owner_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let song_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![song(song_id, project_id)]])
        .append_query_results([vec![project(project_id, owner_id)]])
        .into_connection();

    let (resolved, role) = resolve_song_access(&db, song_id, owner_id).await.unwrap();

    assert_eq!(resolved.id, song_id);
    assert_eq!(role, ProjectRole::Owner);
}

#[tokio::test]
async fn test_absent_song_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MSong>::new()])
        .into_connection();

    let err = resolve_song_access(&db, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Song not found");
}

#[tokio::test]
async fn test_existing_song_with_denied_project_is_forbidden() {
    let owner_id = Uuid::new_v4();
    let stranger_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let song_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![song(song_id, project_id)]])
        .append_query_results([vec![project(project_id, owner_id)]])
        .append_query_results([Vec::<MProjectCollaborator>::new()])
        .into_connection();

    let err = resolve_song_access(&db, song_id, stranger_id)
        .await
        .unwrap_err();

    // Once the song is confirmed to exist, denial is Forbidden, not NotFound
    assert!(matches!(err, AccessError::Forbidden));
}

#[tokio::test]
async fn test_chord_resolves_through_song_and_project() {
    let owner_id = Uuid::new_v4();
    let viewer_id = Uuid::new_v4();
    let project_id = Uuid::new_v4();
    let song_id = Uuid::new_v4();
    let chord_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![chord(chord_id, song_id, 0)]])
        .append_query_results([vec![song(song_id, project_id)]])
        .append_query_results([vec![project(project_id, owner_id)]])
        .append_query_results([vec![collaborator(
            project_id,
            viewer_id,
            CollaboratorRole::Viewer,
            CollaboratorStatus::Accepted,
        )]])
        .into_connection();

    let (resolved, role) = resolve_chord_access(&db, chord_id, viewer_id)
        .await
        .unwrap();

    assert_eq!(resolved.id, chord_id);
    assert_eq!(role, ProjectRole::Viewer);
}

#[test]
fn test_permission_tiers() {
    // Editor tier: content mutation
    assert!(ProjectRole::Owner.can_edit_content());
    assert!(ProjectRole::Admin.can_edit_content());
    assert!(ProjectRole::Editor.can_edit_content());
    assert!(!ProjectRole::Viewer.can_edit_content());

    // Admin tier: collaborator management
    assert!(ProjectRole::Owner.can_manage_collaborators());
    assert!(ProjectRole::Admin.can_manage_collaborators());
    assert!(!ProjectRole::Editor.can_manage_collaborators());
    assert!(!ProjectRole::Viewer.can_manage_collaborators());

    // Owner only: project rename/delete, collaborator removal
    assert!(ProjectRole::Owner.is_owner());
    assert!(!ProjectRole::Admin.is_owner());
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ProjectRole::Owner).unwrap(), "\"owner\"");
    assert_eq!(serde_json::to_string(&ProjectRole::Viewer).unwrap(), "\"viewer\"");
}
