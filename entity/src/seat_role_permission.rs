use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Permission;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seat_role_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub seat_role_id: i32,
    pub permission: Permission,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seat_role::Entity",
        from = "Column::SeatRoleId",
        to = "super::seat_role::Column::Id"
    )]
    SeatRole,
}

impl Related<super::seat_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
