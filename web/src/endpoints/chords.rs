/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use capo_core::access::{resolve_chord_access, resolve_song_access};
use capo_core::consts::{DEFAULT_STRING_COUNT, DEFAULT_TUNING};
use capo_core::ordering::{apply_chord_order, close_position_gap, next_chord_position};
use capo_core::types::*;
use entity::chord::ChordMarkers;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

fn default_string_count() -> i32 {
    DEFAULT_STRING_COUNT
}

fn default_tuning() -> String {
    DEFAULT_TUNING.to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeChordRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub markers: ChordMarkers,
    #[serde(default = "default_string_count")]
    pub string_count: i32,
    #[serde(default = "default_tuning")]
    pub tuning: String,
    #[serde(default)]
    pub starting_fret: i32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchChordRequest {
    pub name: Option<String>,
    pub markers: Option<ChordMarkers>,
    pub string_count: Option<i32>,
    pub tuning: Option<String>,
    pub starting_fret: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReorderRequest {
    pub chord_ids: Vec<Uuid>,
}

pub async fn get_chords(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MChord>>>> {
    let (song, _) = resolve_song_access(&state.db, song_id, user.id).await?;

    let chords = EChord::find()
        .filter(CChord::SongId.eq(song.id))
        .order_by_asc(CChord::Position)
        .all(&state.db)
        .await?;

    let res = BaseResponse {
        error: false,
        message: chords,
    };

    Ok(Json(res))
}

pub async fn post_chord(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
    Json(body): Json<MakeChordRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<MChord>>)> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let position = next_chord_position(&state.db, song.id).await?;

    let now = Utc::now().naive_utc();
    let chord = AChord {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        markers: Set(body.markers),
        position: Set(position),
        string_count: Set(body.string_count),
        tuning: Set(body.tuning.clone()),
        starting_fret: Set(body.starting_fret),
        song_id: Set(song.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let chord = chord.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: chord,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn put_chord(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(chord_id): Path<Uuid>,
    Json(body): Json<PatchChordRequest>,
) -> WebResult<Json<BaseResponse<MChord>>> {
    let (chord, role) = resolve_chord_access(&state.db, chord_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let mut achord: AChord = chord.into();

    if let Some(name) = body.name {
        achord.name = Set(Some(name));
    }

    if let Some(markers) = body.markers {
        achord.markers = Set(markers);
    }

    if let Some(string_count) = body.string_count {
        achord.string_count = Set(string_count);
    }

    if let Some(tuning) = body.tuning {
        achord.tuning = Set(tuning);
    }

    if let Some(starting_fret) = body.starting_fret {
        achord.starting_fret = Set(starting_fret);
    }

    achord.updated_at = Set(Utc::now().naive_utc());
    let chord = achord.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: chord,
    };

    Ok(Json(res))
}

/// Delete and renumber in one transaction so the song's positions stay
/// dense even if the response never reaches the client.
pub async fn delete_chord(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(chord_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let (chord, role) = resolve_chord_access(&state.db, chord_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let song_id = chord.song_id;
    let removed_position = chord.position;

    let txn = state.db.begin().await?;

    let achord: AChord = chord.into();
    achord.delete(&txn).await?;

    close_position_gap(&txn, song_id, removed_position).await?;

    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Atomic, total reorder: the id list must cover the song's chords exactly,
/// otherwise nothing changes and the caller gets a 400.
pub async fn put_reorder(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
    Json(body): Json<ReorderRequest>,
) -> WebResult<Json<BaseResponse<Vec<MChord>>>> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let txn = state.db.begin().await?;

    apply_chord_order(&txn, song.id, &body.chord_ids).await?;

    let chords = EChord::find()
        .filter(CChord::SongId.eq(song.id))
        .order_by_asc(CChord::Position)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let res = BaseResponse {
        error: false,
        message: chords,
    };

    Ok(Json(res))
}
