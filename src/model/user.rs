use entity::sea_orm_active_enums::Permission;
use serde::{Deserialize, Serialize};

/// A user as seen through their main character, with resolved permissions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UserDto {
    pub id: i32,
    pub character_id: i64,
    pub character_name: String,
    pub corporation_id: i64,
    pub corporation_name: String,
    /// Empty unless the DTO was built for a permission check
    pub permissions: Vec<Permission>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CharacterDto {
    pub character_id: i64,
    pub character_name: String,
    pub corporation_id: i64,
    pub corporation_name: String,
}

/// A user with their main character split out from the rest of their characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UserCharactersDto {
    pub id: i32,
    pub main_character: CharacterDto,
    pub characters: Vec<CharacterDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GetUsersDto {
    pub users: Vec<UserCharactersDto>,
    pub total: u64,
}

/// Membership of a user in a mirrored SeAT role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UserRoleDto {
    pub id: i32,
    pub seat_role_id: i64,
    pub seat_role_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GetUserRolesDto {
    pub roles: Vec<UserRoleDto>,
    pub total: u64,
}
