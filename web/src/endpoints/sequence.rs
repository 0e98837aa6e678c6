/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use capo_core::access::resolve_song_access;
use capo_core::ordering::{NewBeat, NewMeasure, replace_sequence_tree};
use capo_core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

fn default_four() -> i32 {
    4
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeSequenceRequest {
    #[serde(default = "default_four")]
    pub time_signature_numerator: i32,
    #[serde(default = "default_four")]
    pub time_signature_denominator: i32,
    #[serde(default = "default_four")]
    pub measures_per_line: i32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateSequenceRequest {
    pub time_signature_numerator: i32,
    pub time_signature_denominator: i32,
    pub measures_per_line: i32,
    #[serde(default)]
    pub measures: Vec<MeasureRequest>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeasureRequest {
    pub position: i32,
    #[serde(default)]
    pub repeat_start: bool,
    #[serde(default)]
    pub repeat_end: bool,
    pub ending_number: Option<i32>,
    #[serde(default)]
    pub beats: Vec<BeatRequest>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BeatRequest {
    pub beat_position: i32,
    pub chord_id: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SequenceResponse {
    pub id: Uuid,
    pub song_id: Uuid,
    pub time_signature_numerator: i32,
    pub time_signature_denominator: i32,
    pub measures_per_line: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub measures: Vec<MeasureResponse>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeasureResponse {
    pub id: Uuid,
    pub position: i32,
    pub repeat_start: bool,
    pub repeat_end: bool,
    pub ending_number: Option<i32>,
    pub beats: Vec<MSequenceBeat>,
}

/// Assemble the nested response: measures by position, beats by
/// beat_position within each measure.
async fn load_sequence_tree<C: ConnectionTrait>(
    db: &C,
    sequence: MSequence,
) -> Result<SequenceResponse, sea_orm::DbErr> {
    let measures = ESequenceMeasure::find()
        .filter(CSequenceMeasure::SequenceId.eq(sequence.id))
        .order_by_asc(CSequenceMeasure::Position)
        .all(db)
        .await?;

    let measure_ids: Vec<Uuid> = measures.iter().map(|m| m.id).collect();

    let mut beats_by_measure: HashMap<Uuid, Vec<MSequenceBeat>> = HashMap::new();

    if !measure_ids.is_empty() {
        let beats = ESequenceBeat::find()
            .filter(CSequenceBeat::MeasureId.is_in(measure_ids))
            .order_by_asc(CSequenceBeat::BeatPosition)
            .all(db)
            .await?;

        for beat in beats {
            beats_by_measure.entry(beat.measure_id).or_default().push(beat);
        }
    }

    let measures = measures
        .into_iter()
        .map(|m| MeasureResponse {
            beats: beats_by_measure.remove(&m.id).unwrap_or_default(),
            id: m.id,
            position: m.position,
            repeat_start: m.repeat_start,
            repeat_end: m.repeat_end,
            ending_number: m.ending_number,
        })
        .collect();

    Ok(SequenceResponse {
        id: sequence.id,
        song_id: sequence.song_id,
        time_signature_numerator: sequence.time_signature_numerator,
        time_signature_denominator: sequence.time_signature_denominator,
        measures_per_line: sequence.measures_per_line,
        created_at: sequence.created_at,
        updated_at: sequence.updated_at,
        measures,
    })
}

pub async fn get_sequence(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<SequenceResponse>>> {
    let (song, _) = resolve_song_access(&state.db, song_id, user.id).await?;

    let sequence = ESequence::find()
        .filter(CSequence::SongId.eq(song.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Sequence"))?;

    let res = BaseResponse {
        error: false,
        message: load_sequence_tree(&state.db, sequence).await?,
    };

    Ok(Json(res))
}

pub async fn post_sequence(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
    Json(body): Json<MakeSequenceRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<SequenceResponse>>)> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let existing = ESequence::find()
        .filter(CSequence::SongId.eq(song.id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("Sequence for this song"));
    }

    let now = Utc::now().naive_utc();
    let sequence = ASequence {
        id: Set(Uuid::new_v4()),
        song_id: Set(song.id),
        time_signature_numerator: Set(body.time_signature_numerator),
        time_signature_denominator: Set(body.time_signature_denominator),
        measures_per_line: Set(body.measures_per_line),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let sequence = sequence.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: load_sequence_tree(&state.db, sequence).await?,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

/// Full replace: header fields are overwritten and the measure/beat tree is
/// rebuilt from the payload under fresh identities.
pub async fn put_sequence(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
    Json(body): Json<UpdateSequenceRequest>,
) -> WebResult<Json<BaseResponse<SequenceResponse>>> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let sequence = ESequence::find()
        .filter(CSequence::SongId.eq(song.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Sequence"))?;

    let measures: Vec<NewMeasure> = body
        .measures
        .iter()
        .map(|m| NewMeasure {
            position: m.position,
            repeat_start: m.repeat_start,
            repeat_end: m.repeat_end,
            ending_number: m.ending_number,
            beats: m
                .beats
                .iter()
                .map(|b| NewBeat {
                    beat_position: b.beat_position,
                    chord_id: b.chord_id,
                })
                .collect(),
        })
        .collect();

    let txn = state.db.begin().await?;

    let mut asequence: ASequence = sequence.into();
    asequence.time_signature_numerator = Set(body.time_signature_numerator);
    asequence.time_signature_denominator = Set(body.time_signature_denominator);
    asequence.measures_per_line = Set(body.measures_per_line);
    asequence.updated_at = Set(Utc::now().naive_utc());
    let sequence = asequence.update(&txn).await?;

    replace_sequence_tree(&txn, sequence.id, &measures).await?;

    // Re-read inside the transaction so the response reflects the commit
    let response = load_sequence_tree(&txn, sequence).await?;

    txn.commit().await?;

    let res = BaseResponse {
        error: false,
        message: response,
    };

    Ok(Json(res))
}

pub async fn delete_sequence(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(song_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let (song, role) = resolve_song_access(&state.db, song_id, user.id).await?;

    if !role.can_edit_content() {
        return Err(WebError::not_authorized());
    }

    let sequence = ESequence::find()
        .filter(CSequence::SongId.eq(song.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Sequence"))?;

    // Measures and beats go with it (FK cascade)
    let asequence: ASequence = sequence.into();
    asequence.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
