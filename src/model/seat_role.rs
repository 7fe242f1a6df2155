use entity::sea_orm_active_enums::Permission;
use serde::{Deserialize, Serialize};

use crate::model::user::UserCharactersDto;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SeatRoleDto {
    pub id: i32,
    pub seat_role_id: i64,
    pub name: String,
    pub member_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GetSeatRolesDto {
    pub roles: Vec<SeatRoleDto>,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GetSeatRoleUsersDto {
    pub users: Vec<UserCharactersDto>,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RolePermissionsDto {
    pub permissions: Vec<Permission>,
    pub total: u64,
}
