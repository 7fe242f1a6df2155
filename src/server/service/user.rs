//! User service layer.
//!
//! Builds the user DTOs shown to the frontend and resolves the permissions a user holds through
//! the mirrored SeAT roles.

use std::collections::HashMap;

use entity::sea_orm_active_enums::Permission;
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{
        CharacterDto, GetUserRolesDto, GetUsersDto, UserCharactersDto, UserDto, UserRoleDto,
    },
    server::{
        data::{
            eve::{character::CharacterRepository, corporation::CorporationRepository},
            seat::{
                role::SeatRoleRepository, role_permission::SeatRolePermissionRepository,
                role_user::SeatRoleUserRepository,
            },
            user::{user::UserRepository, user_character::UserCharacterRepository},
        },
        error::{auth::AuthError, Error},
        service::retry::RetryContext,
    },
};

/// Returns true if `permissions` grants `required`; Admin grants everything.
pub fn has_permission(permissions: &[Permission], required: Permission) -> bool {
    permissions.contains(&Permission::Admin) || permissions.contains(&required)
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user with their main character and its corporation.
    ///
    /// Uses automatic retry logic to handle transient database failures. The returned DTO
    /// carries no permissions; see [`UserService::get_user_with_permissions`].
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::InternalError)` - Main character or corporation record missing
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let ctx = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), |_| {
            let db = db.clone();

            Box::pin(async move {
                let mut users = UserService::new(&db).get_users(&[user_id]).await?;

                Ok(users.remove(&user_id))
            })
        })
        .await
    }

    /// Builds [`UserDto`]s keyed by user ID. Unknown IDs are left out.
    pub async fn get_users(&self, user_ids: &[i32]) -> Result<HashMap<i32, UserDto>, Error> {
        let users = UserRepository::new(self.db)
            .get_many_with_main_character(user_ids)
            .await?;

        let mut corporation_ids: Vec<i32> = users
            .iter()
            .filter_map(|(_, character)| character.as_ref().map(|c| c.corporation_id))
            .collect();
        corporation_ids.sort_unstable();
        corporation_ids.dedup();

        let corporations: HashMap<i32, entity::eve_corporation::Model> =
            CorporationRepository::new(self.db)
                .get_many_by_ids(&corporation_ids)
                .await?
                .into_iter()
                .map(|corporation| (corporation.id, corporation))
                .collect();

        let mut dtos = HashMap::with_capacity(users.len());

        for (user, main_character) in users {
            let main_character = main_character.ok_or_else(|| {
                Error::InternalError(format!(
                    "Failed to find main character information for user ID {} with main character ID {}",
                    user.id, user.main_character_id
                ))
            })?;
            let corporation = corporations
                .get(&main_character.corporation_id)
                .ok_or_else(|| {
                    Error::InternalError(format!(
                        "Failed to find corporation ID {} of character ID {}",
                        main_character.corporation_id, main_character.character_id
                    ))
                })?;

            dtos.insert(
                user.id,
                UserDto {
                    id: user.id,
                    character_id: main_character.character_id,
                    character_name: main_character.name,
                    corporation_id: corporation.corporation_id,
                    corporation_name: corporation.name.clone(),
                    permissions: Vec::new(),
                },
            );
        }

        Ok(dtos)
    }

    /// Resolves the permissions granted to `user`.
    ///
    /// The configured admin character always resolves to Admin alone. Anyone else gets the union
    /// of the permissions of their SeAT roles, collapsed to Admin when one of them grants it.
    pub async fn get_permissions(
        &self,
        user: &UserDto,
        admin_character_id: Option<i64>,
    ) -> Result<Vec<Permission>, Error> {
        if admin_character_id == Some(user.character_id) {
            return Ok(vec![Permission::Admin]);
        }

        let role_ids = SeatRoleUserRepository::new(self.db)
            .get_role_ids_for_user(user.id)
            .await?;
        let permissions = SeatRolePermissionRepository::new(self.db)
            .get_for_roles(&role_ids)
            .await?;

        if permissions.contains(&Permission::Admin) {
            return Ok(vec![Permission::Admin]);
        }

        Ok(permissions)
    }

    /// Retrieves a user with their resolved permissions filled in.
    pub async fn get_user_with_permissions(
        &self,
        user_id: i32,
        admin_character_id: Option<i64>,
    ) -> Result<Option<UserDto>, Error> {
        let Some(mut user) = self.get_user(user_id).await? else {
            return Ok(None);
        };

        user.permissions = self.get_permissions(&user, admin_character_id).await?;

        Ok(Some(user))
    }

    /// Builds [`UserCharactersDto`]s in the order of `user_ids`.
    ///
    /// The main character is split out of `characters`. Unknown user IDs are left out.
    pub async fn get_user_characters(
        &self,
        user_ids: &[i32],
    ) -> Result<Vec<UserCharactersDto>, Error> {
        let users = UserRepository::new(self.db)
            .get_many_with_main_character(user_ids)
            .await?;

        let ownerships = UserCharacterRepository::new(self.db)
            .get_many_by_user_ids(user_ids)
            .await?;

        let mut corporation_ids: Vec<i32> = ownerships
            .iter()
            .filter_map(|(_, character)| character.as_ref())
            .chain(users.iter().filter_map(|(_, character)| character.as_ref()))
            .map(|character| character.corporation_id)
            .collect();
        corporation_ids.sort_unstable();
        corporation_ids.dedup();

        let corporations: HashMap<i32, entity::eve_corporation::Model> =
            CorporationRepository::new(self.db)
                .get_many_by_ids(&corporation_ids)
                .await?
                .into_iter()
                .map(|corporation| (corporation.id, corporation))
                .collect();

        let to_dto = |character: entity::eve_character::Model| -> Result<CharacterDto, Error> {
            let corporation = corporations.get(&character.corporation_id).ok_or_else(|| {
                Error::InternalError(format!(
                    "Failed to find corporation ID {} of character ID {}",
                    character.corporation_id, character.character_id
                ))
            })?;

            Ok(CharacterDto {
                character_id: character.character_id,
                character_name: character.name,
                corporation_id: corporation.corporation_id,
                corporation_name: corporation.name.clone(),
            })
        };

        let mut alts: HashMap<i32, Vec<CharacterDto>> = HashMap::new();
        let main_character_ids: HashMap<i32, i32> = users
            .iter()
            .map(|(user, _)| (user.id, user.main_character_id))
            .collect();

        for (ownership, character) in ownerships {
            let Some(character) = character else {
                continue;
            };
            if main_character_ids.get(&ownership.user_id) == Some(&character.id) {
                continue;
            }

            alts.entry(ownership.user_id)
                .or_default()
                .push(to_dto(character)?);
        }

        let mut mains: HashMap<i32, CharacterDto> = HashMap::with_capacity(users.len());
        for (user, main_character) in users {
            let main_character = main_character.ok_or_else(|| {
                Error::InternalError(format!(
                    "Failed to find main character information for user ID {} with main character ID {}",
                    user.id, user.main_character_id
                ))
            })?;

            mains.insert(user.id, to_dto(main_character)?);
        }

        Ok(user_ids
            .iter()
            .filter_map(|user_id| {
                Some(UserCharactersDto {
                    id: *user_id,
                    main_character: mains.remove(user_id)?,
                    characters: alts.remove(user_id).unwrap_or_default(),
                })
            })
            .collect())
    }

    /// Resolves a character name substring to the IDs of the users owning matching characters.
    pub async fn find_user_ids_by_character_name(&self, name: &str) -> Result<Vec<i32>, Error> {
        let character_ids = CharacterRepository::new(self.db)
            .find_ids_by_name(name)
            .await?;

        Ok(UserCharacterRepository::new(self.db)
            .get_user_ids_by_character_ids(&character_ids)
            .await?)
    }

    /// Pages through users with their characters, optionally filtered by a character name
    /// substring and a user ID.
    pub async fn list_users(
        &self,
        character: Option<&str>,
        user_id: Option<i32>,
        limit: u64,
        page: u64,
    ) -> Result<GetUsersDto, Error> {
        let mut filter = match character {
            Some(name) => Some(self.find_user_ids_by_character_name(name).await?),
            None => None,
        };

        if let Some(user_id) = user_id {
            filter = Some(match filter {
                Some(ids) => ids.into_iter().filter(|id| *id == user_id).collect(),
                None => vec![user_id],
            });
        }

        let (user_ids, total) = UserRepository::new(self.db)
            .list_ids(filter.as_deref(), limit, page)
            .await?;

        Ok(GetUsersDto {
            users: self.get_user_characters(&user_ids).await?,
            total,
        })
    }

    /// Pages through the SeAT roles a user belongs to.
    ///
    /// # Returns
    /// - `Err(Error::AuthError(AuthError::UserNotFound))` - No user with that ID
    pub async fn get_user_roles(
        &self,
        user_id: i32,
        limit: u64,
        page: u64,
    ) -> Result<GetUserRolesDto, Error> {
        if UserRepository::new(self.db).get(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound(user_id).into());
        }

        let (memberships, total) = SeatRoleUserRepository::new(self.db)
            .list_for_user(user_id, limit, page)
            .await?;

        let role_ids: Vec<i32> = memberships.iter().map(|m| m.seat_role_id).collect();
        let roles: HashMap<i32, entity::seat_role::Model> = SeatRoleRepository::new(self.db)
            .get_many(&role_ids)
            .await?
            .into_iter()
            .map(|role| (role.id, role))
            .collect();

        let roles = memberships
            .into_iter()
            .filter_map(|membership| {
                let role = roles.get(&membership.seat_role_id)?;

                Some(UserRoleDto {
                    id: membership.id,
                    seat_role_id: role.seat_role_id,
                    seat_role_name: role.name.clone(),
                })
            })
            .collect();

        Ok(GetUserRolesDto { roles, total })
    }
}
