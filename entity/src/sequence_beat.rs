use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `chord_id` is a weak reference: deleting the chord clears it (SET NULL),
/// it never cascades into the beat.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "sequence_beat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub measure_id: Uuid,
    pub beat_position: i32,
    pub chord_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sequence_measure::Entity",
        from = "Column::MeasureId",
        to = "super::sequence_measure::Column::Id"
    )]
    Measure,
    #[sea_orm(
        belongs_to = "super::chord::Entity",
        from = "Column::ChordId",
        to = "super::chord::Column::Id"
    )]
    Chord,
}

impl ActiveModelBehavior for ActiveModel {}
