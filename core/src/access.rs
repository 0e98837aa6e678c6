/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::project_collaborator::{CollaboratorRole, CollaboratorStatus};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::types::*;

/// Effective role of an identity on a project. Ownership is resolved from
/// `project.user_id` and always wins over any collaborator record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Viewer,
    Editor,
    Admin,
    Owner,
}

impl ProjectRole {
    /// Content mutation: songs, chords, sequences, chord reordering.
    pub fn can_edit_content(self) -> bool {
        match self {
            ProjectRole::Owner | ProjectRole::Admin | ProjectRole::Editor => true,
            ProjectRole::Viewer => false,
        }
    }

    /// Collaborator management: invite, list, change role.
    pub fn can_manage_collaborators(self) -> bool {
        match self {
            ProjectRole::Owner | ProjectRole::Admin => true,
            ProjectRole::Editor | ProjectRole::Viewer => false,
        }
    }

    /// Project rename/delete and collaborator removal.
    pub fn is_owner(self) -> bool {
        matches!(self, ProjectRole::Owner)
    }
}

impl From<CollaboratorRole> for ProjectRole {
    fn from(role: CollaboratorRole) -> Self {
        match role {
            CollaboratorRole::Viewer => ProjectRole::Viewer,
            CollaboratorRole::Editor => ProjectRole::Editor,
            CollaboratorRole::Admin => ProjectRole::Admin,
        }
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    /// The resource itself is absent. Takes precedence over Forbidden; once
    /// the resource is confirmed to exist, denials are Forbidden instead.
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Not authorized")]
    Forbidden,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Resolve the effective role of `user_id` on a project, or deny.
///
/// Project existence is not hidden from authenticated callers: an existing
/// project the caller cannot access yields Forbidden, not NotFound.
pub async fn resolve_project_access<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(MProject, ProjectRole), AccessError> {
    let project = EProject::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or(AccessError::NotFound("Project"))?;

    if project.user_id == user_id {
        return Ok((project, ProjectRole::Owner));
    }

    let collaborator = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::ProjectId.eq(project_id))
                .add(CProjectCollaborator::InviteeId.eq(user_id))
                .add(CProjectCollaborator::Status.eq(CollaboratorStatus::Accepted)),
        )
        .one(db)
        .await?;

    match collaborator {
        Some(collaborator) => Ok((project, ProjectRole::from(collaborator.role))),
        None => Err(AccessError::Forbidden),
    }
}

/// Resolve access to a song through its owning project.
pub async fn resolve_song_access<C: ConnectionTrait>(
    db: &C,
    song_id: Uuid,
    user_id: Uuid,
) -> Result<(MSong, ProjectRole), AccessError> {
    let song = ESong::find_by_id(song_id)
        .one(db)
        .await?
        .ok_or(AccessError::NotFound("Song"))?;

    let (_, role) = resolve_project_access(db, song.project_id, user_id).await?;
    Ok((song, role))
}

/// Resolve access to a chord through song -> project.
pub async fn resolve_chord_access<C: ConnectionTrait>(
    db: &C,
    chord_id: Uuid,
    user_id: Uuid,
) -> Result<(MChord, ProjectRole), AccessError> {
    let chord = EChord::find_by_id(chord_id)
        .one(db)
        .await?
        .ok_or(AccessError::NotFound("Chord"))?;

    let (_, role) = resolve_song_access(db, chord.song_id, user_id).await?;
    Ok((chord, role))
}
