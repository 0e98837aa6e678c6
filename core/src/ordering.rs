/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

use super::types::*;

#[derive(Debug, Error)]
pub enum OrderingError {
    /// The supplied id list is not exactly the song's chord id set.
    #[error("chord_ids must contain exactly all chords in the song")]
    IdSetMismatch,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Next free position in a song: max + 1, or 0 for an empty song.
/// Gaps are never reused; deletion closes them instead.
pub async fn next_chord_position<C: ConnectionTrait>(
    db: &C,
    song_id: Uuid,
) -> Result<i32, DbErr> {
    let chords = EChord::find()
        .filter(CChord::SongId.eq(song_id))
        .all(db)
        .await?;

    Ok(chords.iter().map(|c| c.position + 1).max().unwrap_or(0))
}

/// After removing the chord at `removed_position`, decrement every chord
/// above it so the song's positions stay dense {0..n-1} in the original
/// relative order.
pub async fn close_position_gap<C: ConnectionTrait>(
    db: &C,
    song_id: Uuid,
    removed_position: i32,
) -> Result<(), DbErr> {
    let chords = EChord::find()
        .filter(
            Condition::all()
                .add(CChord::SongId.eq(song_id))
                .add(CChord::Position.gt(removed_position)),
        )
        .order_by_asc(CChord::Position)
        .all(db)
        .await?;

    for chord in chords {
        let position = chord.position - 1;
        let mut achord: AChord = chord.into();
        achord.position = Set(position);
        achord.update(db).await?;
    }

    Ok(())
}

/// Reassign positions from the order of `ordered_ids`. The supplied set must
/// equal the song's chord id set exactly (no omissions, no foreign ids, no
/// duplicates); otherwise nothing is written.
pub async fn apply_chord_order<C: ConnectionTrait>(
    db: &C,
    song_id: Uuid,
    ordered_ids: &[Uuid],
) -> Result<(), OrderingError> {
    let chords = EChord::find()
        .filter(CChord::SongId.eq(song_id))
        .all(db)
        .await?;

    let existing: HashSet<Uuid> = chords.iter().map(|c| c.id).collect();
    let supplied: HashSet<Uuid> = ordered_ids.iter().copied().collect();

    if supplied.len() != ordered_ids.len() || supplied != existing {
        return Err(OrderingError::IdSetMismatch);
    }

    let mut by_id: HashMap<Uuid, MChord> = chords.into_iter().map(|c| (c.id, c)).collect();

    for (position, chord_id) in ordered_ids.iter().enumerate() {
        let chord = by_id.remove(chord_id).ok_or(OrderingError::IdSetMismatch)?;
        let mut achord: AChord = chord.into();
        achord.position = Set(position as i32);
        achord.update(db).await?;
    }

    Ok(())
}

pub struct NewMeasure {
    pub position: i32,
    pub repeat_start: bool,
    pub repeat_end: bool,
    pub ending_number: Option<i32>,
    pub beats: Vec<NewBeat>,
}

pub struct NewBeat {
    pub beat_position: i32,
    pub chord_id: Option<Uuid>,
}

/// Replace a sequence's measure/beat tree wholesale: delete every existing
/// beat and measure, then insert the new set under fresh identities.
/// Measure and beat ids from a prior read are never preserved.
pub async fn replace_sequence_tree<C: ConnectionTrait>(
    db: &C,
    sequence_id: Uuid,
    measures: &[NewMeasure],
) -> Result<(), DbErr> {
    let measure_ids: Vec<Uuid> = ESequenceMeasure::find()
        .filter(CSequenceMeasure::SequenceId.eq(sequence_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();

    if !measure_ids.is_empty() {
        // Beats first: they hang off the measures being deleted
        ESequenceBeat::delete_many()
            .filter(CSequenceBeat::MeasureId.is_in(measure_ids))
            .exec(db)
            .await?;
        ESequenceMeasure::delete_many()
            .filter(CSequenceMeasure::SequenceId.eq(sequence_id))
            .exec(db)
            .await?;
    }

    let now = Utc::now().naive_utc();

    for measure in measures {
        let measure_id = Uuid::new_v4();

        let ameasure = ASequenceMeasure {
            id: Set(measure_id),
            sequence_id: Set(sequence_id),
            position: Set(measure.position),
            repeat_start: Set(measure.repeat_start),
            repeat_end: Set(measure.repeat_end),
            ending_number: Set(measure.ending_number),
            created_at: Set(now),
            updated_at: Set(now),
        };
        ameasure.insert(db).await?;

        if measure.beats.is_empty() {
            continue;
        }

        let abeats: Vec<ASequenceBeat> = measure
            .beats
            .iter()
            .map(|beat| ASequenceBeat {
                id: Set(Uuid::new_v4()),
                measure_id: Set(measure_id),
                beat_position: Set(beat.beat_position),
                chord_id: Set(beat.chord_id),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        ESequenceBeat::insert_many(abeats).exec(db).await?;
    }

    Ok(())
}
