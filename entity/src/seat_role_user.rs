use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seat_role_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Record ID of the role, not the SeAT role ID
    pub seat_role_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seat_role::Entity",
        from = "Column::SeatRoleId",
        to = "super::seat_role::Column::Id"
    )]
    SeatRole,
    #[sea_orm(
        belongs_to = "super::recruit_user::Entity",
        from = "Column::UserId",
        to = "super::recruit_user::Column::Id"
    )]
    RecruitUser,
}

impl Related<super::seat_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatRole.def()
    }
}

impl Related<super::recruit_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecruitUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
