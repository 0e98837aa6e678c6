/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use capo_core::access::resolve_project_access;
use capo_core::types::*;
use entity::project_collaborator::{CollaboratorRole, CollaboratorStatus};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeInviteRequest {
    /// Invitee email; invites never need the invitee's id up front.
    pub identifier: String,
    pub role: CollaboratorRole,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: CollaboratorStatus,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateRoleRequest {
    pub role: CollaboratorRole,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_name: String,
    pub inviter_email: String,
    pub role: CollaboratorRole,
    pub status: CollaboratorStatus,
    pub created_at: NaiveDateTime,
}

pub async fn post_collaborator(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<MakeInviteRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<MProjectCollaborator>>)> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.can_manage_collaborators() {
        return Err(WebError::not_authorized());
    }

    let invitee = EUser::find()
        .filter(CUser::Email.eq(body.identifier.clone()))
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    // The store has a unique (project_id, invitee_id) constraint. A live
    // (pending/accepted) record is a conflict; a declined one makes way for
    // the new invitation.
    let existing = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::ProjectId.eq(project.id))
                .add(CProjectCollaborator::InviteeId.eq(invitee.id)),
        )
        .one(&state.db)
        .await?;

    if let Some(existing) = existing {
        if existing.status != CollaboratorStatus::Declined {
            return Err(WebError::duplicate_invitation());
        }

        let aexisting: AProjectCollaborator = existing.into();
        aexisting.delete(&state.db).await?;
    }

    let now = Utc::now().naive_utc();
    let collaborator = AProjectCollaborator {
        id: Set(Uuid::new_v4()),
        project_id: Set(project.id),
        inviter_id: Set(user.id),
        invitee_id: Set(invitee.id),
        role: Set(body.role),
        status: Set(CollaboratorStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let collaborator = collaborator.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: collaborator,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_collaborators(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MProjectCollaborator>>>> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.can_manage_collaborators() {
        return Err(WebError::not_authorized());
    }

    let collaborators = EProjectCollaborator::find()
        .filter(CProjectCollaborator::ProjectId.eq(project.id))
        .all(&state.db)
        .await?;

    let res = BaseResponse {
        error: false,
        message: collaborators,
    };

    Ok(Json(res))
}

/// Invitation acceptance/decline. Only the invitee decides; nobody ever
/// moves a record back to pending.
pub async fn patch_collaborator_status(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(collaborator_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> WebResult<Json<BaseResponse<MProjectCollaborator>>> {
    if body.status == CollaboratorStatus::Pending {
        return Err(WebError::cannot_reset_to_pending());
    }

    let collaborator = EProjectCollaborator::find_by_id(collaborator_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Collaborator"))?;

    if collaborator.invitee_id != user.id {
        return Err(WebError::not_authorized());
    }

    let mut acollaborator: AProjectCollaborator = collaborator.into();
    acollaborator.status = Set(body.status);
    acollaborator.updated_at = Set(Utc::now().naive_utc());
    let collaborator = acollaborator.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: collaborator,
    };

    Ok(Json(res))
}

/// Role changes are independent of status and allowed on pending records.
pub async fn patch_collaborator_role(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path((project_id, collaborator_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateRoleRequest>,
) -> WebResult<Json<BaseResponse<MProjectCollaborator>>> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.can_manage_collaborators() {
        return Err(WebError::not_authorized());
    }

    let collaborator = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::Id.eq(collaborator_id))
                .add(CProjectCollaborator::ProjectId.eq(project.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Collaborator"))?;

    let mut acollaborator: AProjectCollaborator = collaborator.into();
    acollaborator.role = Set(body.role);
    acollaborator.updated_at = Set(Utc::now().naive_utc());
    let collaborator = acollaborator.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: collaborator,
    };

    Ok(Json(res))
}

pub async fn delete_collaborator(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path((project_id, collaborator_id)): Path<(Uuid, Uuid)>,
) -> WebResult<StatusCode> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.is_owner() {
        return Err(WebError::not_authorized());
    }

    let collaborator = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::Id.eq(collaborator_id))
                .add(CProjectCollaborator::ProjectId.eq(project.id)),
        )
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Collaborator"))?;

    // The owner is never a removable collaborator row, even if one existed
    if collaborator.invitee_id == project.user_id {
        return Err(WebError::cannot_remove_owner());
    }

    let acollaborator: AProjectCollaborator = collaborator.into();
    acollaborator.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Pending invitations addressed to the caller, enriched with the inviter
/// email and project name. A read-side join, not a state transition.
pub async fn get_my_invitations(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<InvitationResponse>>>> {
    let invitations = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::InviteeId.eq(user.id))
                .add(CProjectCollaborator::Status.eq(CollaboratorStatus::Pending)),
        )
        .all(&state.db)
        .await?;

    let mut responses = Vec::with_capacity(invitations.len());

    for invitation in invitations {
        let Some(project) = EProject::find_by_id(invitation.project_id)
            .one(&state.db)
            .await?
        else {
            continue;
        };

        let Some(inviter) = EUser::find_by_id(invitation.inviter_id)
            .one(&state.db)
            .await?
        else {
            continue;
        };

        responses.push(InvitationResponse {
            id: invitation.id,
            project_id: project.id,
            project_name: project.name,
            inviter_email: inviter.email,
            role: invitation.role,
            status: invitation.status,
            created_at: invitation.created_at,
        });
    }

    let res = BaseResponse {
        error: false,
        message: responses,
    };

    Ok(Json(res))
}
