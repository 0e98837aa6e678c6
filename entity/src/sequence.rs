use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one sequence per song (`song_id` is unique at the store).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "sequence")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub song_id: Uuid,
    pub time_signature_numerator: i32,
    pub time_signature_denominator: i32,
    pub measures_per_line: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::song::Entity",
        from = "Column::SongId",
        to = "super::song::Column::Id"
    )]
    Song,
}

impl ActiveModelBehavior for ActiveModel {}
