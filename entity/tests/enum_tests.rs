/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for entity enums

use entity::project_collaborator::{CollaboratorRole, CollaboratorStatus};
use sea_orm::ActiveEnum;

#[test]
fn test_collaborator_role_string_values() {
    assert_eq!(CollaboratorRole::Viewer.to_value(), "viewer");
    assert_eq!(CollaboratorRole::Editor.to_value(), "editor");
    assert_eq!(CollaboratorRole::Admin.to_value(), "admin");
}

#[test]
fn test_collaborator_status_string_values() {
    assert_eq!(CollaboratorStatus::Pending.to_value(), "pending");
    assert_eq!(CollaboratorStatus::Accepted.to_value(), "accepted");
    assert_eq!(CollaboratorStatus::Declined.to_value(), "declined");
}

#[test]
fn test_collaborator_role_serde_round_trip() {
    let json = serde_json::to_string(&CollaboratorRole::Editor).unwrap();
    assert_eq!(json, "\"editor\"");

    let role: CollaboratorRole = serde_json::from_str(&json).unwrap();
    assert_eq!(role, CollaboratorRole::Editor);
}

#[test]
fn test_unknown_role_rejected() {
    let result: Result<CollaboratorRole, _> = serde_json::from_str("\"owner\"");
    // "owner" is not a collaborator role; ownership lives on the project row
    assert!(result.is_err());

    let result: Result<CollaboratorStatus, _> = serde_json::from_str("\"revoked\"");
    assert!(result.is_err());
}

#[test]
fn test_status_try_from_value() {
    let status = CollaboratorStatus::try_from_value(&"accepted".to_string()).unwrap();
    assert_eq!(status, CollaboratorStatus::Accepted);

    assert!(CollaboratorStatus::try_from_value(&"unknown".to_string()).is_err());
}
