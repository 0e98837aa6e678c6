/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use capo_core::access::{resolve_project_access, resolve_song_access};
use capo_core::input::check_display_name;
use capo_core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeSongRequest {
    pub name: String,
}

pub async fn get_songs(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MSong>>>> {
    let (project, _) = resolve_project_access(&state.db, project_id, user.id).await?;

    let songs = ESong::find()
        .filter(CSong::ProjectId.eq(project.id))
        .order_by_desc(CSong::UpdatedAt)
        .all(&state.db)
        .await?;

    let res = BaseResponse {
        error: false,
        message: songs,
    };

    Ok(Json(res))
}

pub async fn post_song(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<MakeSongRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<MSong>>)> {
    let (project, role) = resolve_project_access(&state.db, project_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    if check_display_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Song Name"));
    }

    let now = Utc::now().naive_utc();
    let song = ASong {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        project_id: Set(project.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let song = song.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: song,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_song(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MSong>>> {
    let (song, _) = resolve_song_access(&state.db, song_id, user.id).await?;

    let res = BaseResponse {
        error: false,
        message: song,
    };

    Ok(Json(res))
}

pub async fn put_song(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
    Json(body): Json<MakeSongRequest>,
) -> WebResult<Json<BaseResponse<MSong>>> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    if check_display_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Song Name"));
    }

    let mut asong: ASong = song.into();
    asong.name = Set(body.name.clone());
    asong.updated_at = Set(Utc::now().naive_utc());
    let song = asong.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: song,
    };

    Ok(Json(res))
}

pub async fn delete_song(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    // Chords and the sequence tree go with it (FK cascade)
    let asong: ASong = song.into();
    asong.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
