use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily killboard snapshot for a recruiting corporation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "corporation_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// EVE corporation ID
    pub corporation_id: i64,
    pub members: i64,
    pub ships_destroyed: i64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
