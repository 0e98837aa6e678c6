/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use capo_core::access::{ProjectRole, resolve_project_access};
use capo_core::input::check_display_name;
use capo_core::types::*;
use entity::project_collaborator::CollaboratorStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeProjectRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub my_role: ProjectRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,
}

impl ProjectResponse {
    fn new(project: MProject, my_role: ProjectRole, shared_by: Option<String>) -> Self {
        ProjectResponse {
            id: project.id,
            name: project.name,
            user_id: project.user_id,
            created_at: project.created_at,
            updated_at: project.updated_at,
            my_role,
            shared_by,
        }
    }
}

/// Owned projects plus accepted collaborations, newest first. Pending
/// invitations do not surface here; they have their own view.
pub async fn get_projects(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<ProjectResponse>>>> {
    let owned = EProject::find()
        .filter(CProject::UserId.eq(user.id))
        .order_by_desc(CProject::UpdatedAt)
        .all(&state.db)
        .await?;

    let collaborations = EProjectCollaborator::find()
        .filter(
            Condition::all()
                .add(CProjectCollaborator::InviteeId.eq(user.id))
                .add(CProjectCollaborator::Status.eq(CollaboratorStatus::Accepted)),
        )
        .all(&state.db)
        .await?;

    let mut projects: Vec<ProjectResponse> = owned
        .into_iter()
        .map(|p| ProjectResponse::new(p, ProjectRole::Owner, None))
        .collect();

    for collaboration in collaborations {
        let Some(project) = EProject::find_by_id(collaboration.project_id)
            .one(&state.db)
            .await?
        else {
            continue;
        };

        let inviter = EUser::find_by_id(collaboration.inviter_id)
            .one(&state.db)
            .await?;

        projects.push(ProjectResponse::new(
            project,
            ProjectRole::from(collaboration.role),
            inviter.map(|u| u.email),
        ));
    }

    projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let res = BaseResponse {
        error: false,
        message: projects,
    };

    Ok(Json(res))
}

pub async fn post_project(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeProjectRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<ProjectResponse>>)> {
    if check_display_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Project Name"));
    }

    let now = Utc::now().naive_utc();
    let project = AProject {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        user_id: Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let project = project.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: ProjectResponse::new(project, ProjectRole::Owner, None),
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_project(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<ProjectResponse>>> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    let res = BaseResponse {
        error: false,
        message: ProjectResponse::new(project, role, None),
    };

    Ok(Json(res))
}

pub async fn put_project(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<MakeProjectRequest>,
) -> WebResult<Json<BaseResponse<ProjectResponse>>> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.is_owner() {
        return Err(WebError::not_authorized());
    }

    if check_display_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Project Name"));
    }

    let mut aproject: AProject = project.into();
    aproject.name = Set(body.name.clone());
    aproject.updated_at = Set(Utc::now().naive_utc());
    let project = aproject.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: ProjectResponse::new(project, role, None),
    };

    Ok(Json(res))
}

pub async fn delete_project(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.is_owner() {
        return Err(WebError::not_authorized());
    }

    // Collaborators, songs, chords and sequences go with it (FK cascade)
    let aproject: AProject = project.into();
    aproject.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
