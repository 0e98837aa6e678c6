/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the chord entity and its marker payload

use chrono::NaiveDate;
use entity::chord::{self, ChordMarker, ChordMarkers};
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

#[test]
fn test_markers_serialize_as_plain_array() {
    let markers = ChordMarkers(vec![
        ChordMarker { string: 2, fret: 1 },
        ChordMarker { string: 3, fret: 2 },
    ]);

    let json = serde_json::to_string(&markers).unwrap();
    assert_eq!(json, r#"[{"string":2,"fret":1},{"string":3,"fret":2}]"#);

    let parsed: ChordMarkers = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, markers);
}

#[tokio::test]
async fn test_chord_entity_basic() -> Result<(), DbErr> {
    let chord_id = Uuid::new_v4();
    let song_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![chord::Model {
            id: chord_id,
            name: Some("Am".to_owned()),
            markers: ChordMarkers(vec![ChordMarker { string: 2, fret: 1 }]),
            position: 0,
            string_count: 6,
            tuning: "EADGBE".to_owned(),
            starting_fret: 0,
            song_id,
            created_at: naive_date,
            updated_at: naive_date,
        }]])
        .into_connection();

    let result = chord::Entity::find_by_id(chord_id).one(&db).await?;

    assert!(result.is_some());
    let chord = result.unwrap();
    assert_eq!(chord.name.as_deref(), Some("Am"));
    assert_eq!(chord.position, 0);
    assert_eq!(chord.markers.0.len(), 1);
    assert_eq!(chord.song_id, song_id);

    Ok(())
}
