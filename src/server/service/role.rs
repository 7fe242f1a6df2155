//! Admin views of the mirrored SeAT roles and the permissions granted through them.

use std::collections::HashSet;

use entity::sea_orm_active_enums::Permission;
use sea_orm::{DatabaseConnection, Iterable, TransactionTrait};

use crate::{
    model::seat_role::{GetSeatRoleUsersDto, GetSeatRolesDto, RolePermissionsDto, SeatRoleDto},
    server::{
        data::{
            page_offset,
            seat::{
                role::SeatRoleRepository, role_permission::SeatRolePermissionRepository,
                role_user::SeatRoleUserRepository,
            },
        },
        error::{seat::SeatError, Error},
        service::user::UserService,
    },
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    /// Creates a new instance of [`RoleService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pages through roles ordered by name, each with its member count.
    pub async fn list_roles(
        &self,
        name: Option<&str>,
        seat_role_id: Option<i64>,
        limit: u64,
        page: u64,
    ) -> Result<GetSeatRolesDto, Error> {
        let role_repo = SeatRoleRepository::new(self.db);

        let (roles, total) = role_repo.list(name, seat_role_id, limit, page).await?;
        let role_ids: Vec<i32> = roles.iter().map(|role| role.id).collect();
        let member_counts = role_repo.member_counts(&role_ids).await?;

        Ok(GetSeatRolesDto {
            roles: roles
                .into_iter()
                .map(|role| SeatRoleDto {
                    member_count: member_counts.get(&role.id).copied().unwrap_or(0),
                    id: role.id,
                    seat_role_id: role.seat_role_id,
                    name: role.name,
                })
                .collect(),
            total,
        })
    }

    /// Pages through the members of a role with their characters.
    ///
    /// `character` narrows the members to users owning a character whose name contains it;
    /// `total` counts the narrowed set.
    pub async fn get_role_users(
        &self,
        role_id: i32,
        character: Option<&str>,
        limit: u64,
        page: u64,
    ) -> Result<GetSeatRoleUsersDto, Error> {
        self.ensure_role_exists(role_id).await?;

        let user_service = UserService::new(self.db);

        let filter = match character.filter(|name| !name.is_empty()) {
            Some(name) => Some(user_service.find_user_ids_by_character_name(name).await?),
            None => None,
        };

        let (user_ids, total) = SeatRoleUserRepository::new(self.db)
            .list_user_ids_for_role(role_id, filter.as_deref(), limit, page)
            .await?;

        Ok(GetSeatRoleUsersDto {
            users: user_service.get_user_characters(&user_ids).await?,
            total,
        })
    }

    /// Pages through the permissions granted by a role, in declaration order.
    pub async fn get_role_permissions(
        &self,
        role_id: i32,
        limit: u64,
        page: u64,
    ) -> Result<RolePermissionsDto, Error> {
        self.ensure_role_exists(role_id).await?;

        let permissions = ordered(
            SeatRolePermissionRepository::new(self.db)
                .get_for_roles(&[role_id])
                .await?,
        );
        let total = permissions.len() as u64;

        Ok(RolePermissionsDto {
            permissions: permissions
                .into_iter()
                .skip(usize::try_from(page_offset(limit, page)).unwrap_or(usize::MAX))
                .take(limit as usize)
                .collect(),
            total,
        })
    }

    /// Replaces the permissions granted by a role.
    ///
    /// Only the difference against what is stored is written, inside one transaction.
    pub async fn set_role_permissions(
        &self,
        role_id: i32,
        permissions: Vec<Permission>,
    ) -> Result<RolePermissionsDto, Error> {
        let desired: HashSet<Permission> = permissions.into_iter().collect();

        let txn = self.db.begin().await?;

        let role = SeatRoleRepository::new(&txn)
            .get(role_id)
            .await?
            .ok_or(SeatError::RoleNotFound(role_id as i64))?;

        SeatRolePermissionRepository::new(&txn)
            .set_for_role(role.id, &desired)
            .await?;

        txn.commit().await?;

        let permissions = ordered(desired.into_iter().collect());

        Ok(RolePermissionsDto {
            total: permissions.len() as u64,
            permissions,
        })
    }

    async fn ensure_role_exists(&self, role_id: i32) -> Result<(), Error> {
        if SeatRoleRepository::new(self.db).get(role_id).await?.is_none() {
            return Err(SeatError::RoleNotFound(role_id as i64).into());
        }

        Ok(())
    }
}

fn ordered(permissions: Vec<Permission>) -> Vec<Permission> {
    Permission::iter()
        .filter(|permission| permissions.contains(permission))
        .collect()
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::Permission;
    use recruit_test_utils::prelude::*;

    use crate::server::{
        error::{seat::SeatError, Error},
        service::role::RoleService,
    };

    /// Expect roles to be listed with their member counts
    #[tokio::test]
    async fn lists_roles_with_member_counts() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_seat_tables()
            .with_user_for_character(95_000_001, 98000001)
            .with_user_for_character(95_000_002, 98000001)
            .build()
            .await?;
        let recruiters = test.seat().insert_role(10, "Recruiters").await?;
        test.seat().insert_role(11, "Directors").await?;
        test.seat().insert_role_user(recruiters.id, 1).await?;
        test.seat().insert_role_user(recruiters.id, 2).await?;

        let dto = RoleService::new(&test.db)
            .list_roles(None, None, 10, 1)
            .await?;

        assert_eq!(dto.total, 2);
        // Ordered by name
        assert_eq!(dto.roles[0].name, "Directors");
        assert_eq!(dto.roles[0].member_count, 0);
        assert_eq!(dto.roles[1].member_count, 2);

        Ok(())
    }

    /// Expect the character filter to narrow both the page and the total
    #[tokio::test]
    async fn filters_role_users_by_character() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_seat_tables()
            .with_user_for_character(95_000_001, 98000001)
            .with_user_for_character(95_000_002, 98000001)
            .build()
            .await?;
        let role = test.seat().insert_role(10, "Recruiters").await?;
        test.seat().insert_role_user(role.id, 1).await?;
        test.seat().insert_role_user(role.id, 2).await?;

        let dto = RoleService::new(&test.db)
            .get_role_users(role.id, Some("character 95000002"), 10, 1)
            .await?;

        assert_eq!(dto.total, 1);
        assert_eq!(dto.users.len(), 1);
        assert_eq!(dto.users[0].main_character.character_id, 95_000_002);

        Ok(())
    }

    /// Expect an unknown role to be reported as not found
    #[tokio::test]
    async fn unknown_role_is_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_user_tables()
            .with_seat_tables()
            .build()
            .await?;

        let result = RoleService::new(&test.db)
            .set_role_permissions(42, vec![Permission::Admin])
            .await;

        assert!(matches!(
            result,
            Err(Error::SeatError(SeatError::RoleNotFound(42)))
        ));

        Ok(())
    }

    /// Expect permissions to be replaced and read back in declaration order
    #[tokio::test]
    async fn replaces_permissions() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_user_tables()
            .with_seat_tables()
            .build()
            .await?;
        let role = test.seat().insert_role(10, "Recruiters").await?;
        test.seat()
            .insert_role_permission(role.id, Permission::ManageSettings)
            .await?;
        let service = RoleService::new(&test.db);

        service
            .set_role_permissions(
                role.id,
                vec![
                    Permission::RejectApplication,
                    Permission::ViewApplication,
                    Permission::ViewApplication,
                ],
            )
            .await?;
        let dto = service.get_role_permissions(role.id, 10, 1).await?;

        assert_eq!(
            dto.permissions,
            vec![Permission::ViewApplication, Permission::RejectApplication]
        );
        assert_eq!(dto.total, 2);

        Ok(())
    }
}
