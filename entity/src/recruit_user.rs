use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recruit_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// SeAT user this account is linked to, if any
    #[sea_orm(unique, nullable)]
    pub seat_user_id: Option<i64>,
    /// Record ID of the user's main character
    pub main_character_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eve_character::Entity",
        from = "Column::MainCharacterId",
        to = "super::eve_character::Column::Id"
    )]
    MainCharacter,
}

impl Related<super::eve_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MainCharacter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
