use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ownership of a character by a user, keyed by the SSO owner hash.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recruit_user_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(unique)]
    pub character_id: i32,
    pub owner_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recruit_user::Entity",
        from = "Column::UserId",
        to = "super::recruit_user::Column::Id"
    )]
    RecruitUser,
    #[sea_orm(
        belongs_to = "super::eve_character::Entity",
        from = "Column::CharacterId",
        to = "super::eve_character::Column::Id"
    )]
    EveCharacter,
}

impl Related<super::recruit_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecruitUser.def()
    }
}

impl Related<super::eve_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
