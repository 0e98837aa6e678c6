use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "sequence_measure")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub sequence_id: Uuid,
    pub position: i32,
    pub repeat_start: bool,
    pub repeat_end: bool,
    pub ending_number: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sequence::Entity",
        from = "Column::SequenceId",
        to = "super::sequence::Column::Id"
    )]
    Sequence,
}

impl ActiveModelBehavior for ActiveModel {}
